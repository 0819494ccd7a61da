//! Tag and tag category repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for `tags`, `tag_categories` and `app_settings`.
//! - Centralize find-or-create of automatic tags (`ensure_automatic_tag`).
//!
//! # Invariants
//! - At most one automatic tag exists per name (case-insensitive).
//! - Tag names are unique within one category (case-insensitive).
//! - Deleting a category deletes its tags; deleting a tag only drops its
//!   entry associations.

use super::sqlite_util::{bool_to_int, ensure_connection_ready, parse_flag, parse_uuid};
use super::{RepoError, RepoResult};
use crate::model::tag::{AutomaticTag, CategoryId, Tag, TagCategory, TagId};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Column list shared by every tag projection. Expects the `tags` table aliased as `t`.
pub(crate) const TAG_COLUMNS_SQL: &str = "t.id AS id,
    t.name AS name,
    t.icon AS icon,
    t.is_automatic AS is_automatic,
    t.is_predefined AS is_predefined,
    t.category_id AS category_id,
    t.created_at AS created_at";

const CATEGORY_SELECT_SQL: &str = "SELECT
    id,
    name,
    icon,
    color_hex,
    is_system_category,
    sort_order,
    created_at
FROM tag_categories";

/// Settings key marking the predefined catalog as seeded.
pub const CATALOG_SEEDED_KEY: &str = "predefined_catalog_seeded";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "tags",
        &[
            "id",
            "name",
            "icon",
            "is_automatic",
            "is_predefined",
            "category_id",
            "created_at",
        ],
    ),
    (
        "tag_categories",
        &[
            "id",
            "name",
            "icon",
            "color_hex",
            "is_system_category",
            "sort_order",
            "created_at",
        ],
    ),
    ("app_settings", &["key", "value"]),
];

/// Store contract for tags, categories and the seeding flag.
pub trait TagRepository {
    fn insert_tag(&self, tag: &Tag) -> RepoResult<TagId>;
    fn insert_category(&self, category: &TagCategory) -> RepoResult<CategoryId>;
    fn get_tag(&self, id: TagId) -> RepoResult<Option<Tag>>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<TagCategory>>;
    /// Finds a tag by case-insensitive name and automatic flag.
    fn find_tag_by_name(&self, name: &str, is_automatic: bool) -> RepoResult<Option<Tag>>;
    /// Finds a tag by case-insensitive name inside one category.
    fn find_tag_in_category(&self, category_id: CategoryId, name: &str)
        -> RepoResult<Option<Tag>>;
    /// Finds a category by case-insensitive name and system flag.
    fn find_category_by_name(
        &self,
        name: &str,
        is_system_category: bool,
    ) -> RepoResult<Option<TagCategory>>;
    /// Lists categories by `sort_order ASC, name ASC`.
    fn list_categories(&self) -> RepoResult<Vec<TagCategory>>;
    /// Lists the tags of one category in insertion order.
    fn list_tags_in_category(&self, category_id: CategoryId) -> RepoResult<Vec<Tag>>;
    /// Lists every tag by name.
    fn list_tags(&self) -> RepoResult<Vec<Tag>>;
    fn delete_tag(&self, id: TagId) -> RepoResult<()>;
    /// Deletes one category together with its tags.
    fn delete_category(&self, id: CategoryId) -> RepoResult<()>;
    /// Returns the single automatic tag of this kind, creating it when absent.
    fn ensure_automatic_tag(&self, kind: AutomaticTag) -> RepoResult<Tag>;
    fn is_catalog_seeded(&self) -> RepoResult<bool>;
    fn mark_catalog_seeded(&self) -> RepoResult<()>;
}

/// SQLite-backed tag repository.
pub struct SqliteTagRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTagRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }

    fn query_tags(&self, filter_sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TAG_COLUMNS_SQL} FROM tags t {filter_sql};"))?;
        let mut rows = stmt.query(params)?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(parse_tag_row(row)?);
        }
        Ok(tags)
    }

    fn query_one_tag(
        &self,
        filter_sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Option<Tag>> {
        Ok(self.query_tags(filter_sql, params)?.into_iter().next())
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn insert_tag(&self, tag: &Tag) -> RepoResult<TagId> {
        self.conn.execute(
            "INSERT INTO tags (
                id,
                name,
                icon,
                is_automatic,
                is_predefined,
                category_id,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                tag.id.to_string(),
                tag.name.as_str(),
                tag.icon.as_str(),
                bool_to_int(tag.is_automatic),
                bool_to_int(tag.is_predefined),
                tag.category_id.map(|id| id.to_string()),
                tag.created_at,
            ],
        )?;
        Ok(tag.id)
    }

    fn insert_category(&self, category: &TagCategory) -> RepoResult<CategoryId> {
        self.conn.execute(
            "INSERT INTO tag_categories (
                id,
                name,
                icon,
                color_hex,
                is_system_category,
                sort_order,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                category.id.to_string(),
                category.name.as_str(),
                category.icon.as_str(),
                category.color_hex.as_deref(),
                bool_to_int(category.is_system_category),
                category.sort_order,
                category.created_at,
            ],
        )?;
        Ok(category.id)
    }

    fn get_tag(&self, id: TagId) -> RepoResult<Option<Tag>> {
        self.query_one_tag("WHERE t.id = ?1", [id.to_string()])
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<TagCategory>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE id = ?1;"))?;
        let category = stmt
            .query_row([id.to_string()], |row| Ok(parse_category_row(row)))
            .optional()?;
        category.transpose()
    }

    fn find_tag_by_name(&self, name: &str, is_automatic: bool) -> RepoResult<Option<Tag>> {
        self.query_one_tag(
            "WHERE t.name = ?1 COLLATE NOCASE
               AND t.is_automatic = ?2
             ORDER BY t.created_at ASC, t.id ASC
             LIMIT 1",
            params![name.trim(), bool_to_int(is_automatic)],
        )
    }

    fn find_tag_in_category(
        &self,
        category_id: CategoryId,
        name: &str,
    ) -> RepoResult<Option<Tag>> {
        self.query_one_tag(
            "WHERE t.category_id = ?1
               AND t.name = ?2 COLLATE NOCASE",
            params![category_id.to_string(), name.trim()],
        )
    }

    fn find_category_by_name(
        &self,
        name: &str,
        is_system_category: bool,
    ) -> RepoResult<Option<TagCategory>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CATEGORY_SELECT_SQL}
             WHERE name = ?1 COLLATE NOCASE
               AND is_system_category = ?2
             ORDER BY created_at ASC, id ASC
             LIMIT 1;"
        ))?;
        let category = stmt
            .query_row(
                params![name.trim(), bool_to_int(is_system_category)],
                |row| Ok(parse_category_row(row)),
            )
            .optional()?;
        category.transpose()
    }

    fn list_categories(&self) -> RepoResult<Vec<TagCategory>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CATEGORY_SELECT_SQL} ORDER BY sort_order ASC, name COLLATE NOCASE ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn list_tags_in_category(&self, category_id: CategoryId) -> RepoResult<Vec<Tag>> {
        self.query_tags(
            "WHERE t.category_id = ?1 ORDER BY t.rowid ASC",
            [category_id.to_string()],
        )
    }

    fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        self.query_tags("ORDER BY t.name COLLATE NOCASE ASC, t.id ASC", [])
    }

    fn delete_tag(&self, id: TagId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tags WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::TagNotFound(id));
        }
        Ok(())
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tag_categories WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::CategoryNotFound(id));
        }
        Ok(())
    }

    fn ensure_automatic_tag(&self, kind: AutomaticTag) -> RepoResult<Tag> {
        if let Some(existing) = self.find_tag_by_name(kind.name(), true)? {
            return Ok(existing);
        }

        // The partial unique index on automatic names turns a racing insert into a no-op.
        let candidate = Tag::automatic(kind);
        self.conn.execute(
            "INSERT OR IGNORE INTO tags (
                id,
                name,
                icon,
                is_automatic,
                is_predefined,
                category_id,
                created_at
            ) VALUES (?1, ?2, ?3, 1, 0, NULL, ?4);",
            params![
                candidate.id.to_string(),
                candidate.name.as_str(),
                candidate.icon.as_str(),
                candidate.created_at,
            ],
        )?;

        self.find_tag_by_name(kind.name(), true)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "automatic tag `{}` missing after insert",
                kind.name()
            ))
        })
    }

    fn is_catalog_seeded(&self) -> RepoResult<bool> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM app_settings WHERE key = ?1;",
                [CATALOG_SEEDED_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.as_deref() == Some("1"))
    }

    fn mark_catalog_seeded(&self) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO app_settings (key, value, updated_at)
             VALUES (?1, '1', (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            [CATALOG_SEEDED_KEY],
        )?;
        Ok(())
    }
}

pub(crate) fn parse_tag_row(row: &Row<'_>) -> RepoResult<Tag> {
    let id_text: String = row.get("id")?;
    let category_id = match row.get::<_, Option<String>>("category_id")? {
        Some(value) => Some(parse_uuid(&value, "tags.category_id")?),
        None => None,
    };

    Ok(Tag {
        id: parse_uuid(&id_text, "tags.id")?,
        name: row.get("name")?,
        icon: row.get("icon")?,
        is_automatic: parse_flag(row.get("is_automatic")?, "tags.is_automatic")?,
        is_predefined: parse_flag(row.get("is_predefined")?, "tags.is_predefined")?,
        category_id,
        created_at: row.get("created_at")?,
    })
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<TagCategory> {
    let id_text: String = row.get("id")?;
    Ok(TagCategory {
        id: parse_uuid(&id_text, "tag_categories.id")?,
        name: row.get("name")?,
        icon: row.get("icon")?,
        color_hex: row.get("color_hex")?,
        is_system_category: parse_flag(
            row.get("is_system_category")?,
            "tag_categories.is_system_category",
        )?,
        sort_order: row.get("sort_order")?,
        created_at: row.get("created_at")?,
    })
}

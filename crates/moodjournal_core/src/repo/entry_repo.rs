//! Journal entry repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and listing APIs over `journal_entries`.
//! - Own entry <-> tag association writes (`entry_tags`).
//! - Provide the hard-delete path that erases an entry from storage.
//!
//! # Invariants
//! - Write paths call `JournalEntry::validate()` before SQL mutations.
//! - Default listings exclude soft-deleted rows.
//! - Listing order is deterministic: chosen key, then insertion order in
//!   the same direction.
//! - Hard delete removes association rows but never the tags themselves.

use super::sqlite_util::{bool_to_int, ensure_connection_ready, parse_flag, parse_uuid};
use super::tag_repo::{parse_tag_row, TAG_COLUMNS_SQL};
use super::{RepoError, RepoResult};
use crate::model::entry::{EntryId, JournalEntry, Location};
use crate::model::mood::Mood;
use crate::model::tag::{Tag, TagId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    content,
    mood,
    created_at,
    updated_at,
    is_deleted,
    deleted_at,
    location_name,
    latitude,
    longitude
FROM journal_entries";

const MOOD_RANK_SQL: &str = "CASE mood
    WHEN 'terrible' THEN 1
    WHEN 'bad' THEN 2
    WHEN 'okay' THEN 3
    WHEN 'good' THEN 4
    ELSE 5
END";

const ENTRY_LIST_DEFAULT_LIMIT: u32 = 50;
const ENTRY_LIST_LIMIT_MAX: u32 = 500;

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "journal_entries",
        &[
            "id",
            "content",
            "mood",
            "created_at",
            "updated_at",
            "is_deleted",
            "deleted_at",
            "location_name",
            "latitude",
            "longitude",
        ],
    ),
    ("entry_tags", &["entry_id", "tag_id"]),
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
];

/// Which lifecycle states a listing includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryScope {
    /// Non-deleted entries only.
    #[default]
    Active,
    /// Soft-deleted entries only.
    Trashed,
    All,
}

/// Primary sort key for entry listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntrySortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    /// Mood scale value.
    Mood,
    /// Time the entry was moved to the trash. Active entries have none.
    DeletedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Query options for listing entries.
///
/// The default lists active entries, newest first, without a row limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryListQuery {
    pub scope: EntryScope,
    pub sort_by: EntrySortKey,
    pub order: SortOrder,
    /// Only entries carrying this tag.
    pub tag_id: Option<TagId>,
    /// `None` returns every matching row. `Some(0)` means the default page size.
    pub limit: Option<u32>,
    pub offset: u32,
}

impl EntryListQuery {
    /// Active entries sorted by the given key and order.
    pub fn active(sort_by: EntrySortKey, order: SortOrder) -> Self {
        Self {
            sort_by,
            order,
            ..Self::default()
        }
    }

    /// Trashed entries, most recently trashed first.
    pub fn trashed() -> Self {
        Self {
            scope: EntryScope::Trashed,
            sort_by: EntrySortKey::DeletedAt,
            ..Self::default()
        }
    }
}

/// Store contract for journal entries.
pub trait EntryRepository {
    /// Inserts one entry together with its tag associations.
    fn insert_entry(&self, entry: &JournalEntry) -> RepoResult<EntryId>;
    /// Persists content, mood, timestamps, trash state and location.
    ///
    /// Tag associations are left untouched; see [`EntryRepository::set_entry_tags`].
    fn update_entry(&self, entry: &JournalEntry) -> RepoResult<()>;
    /// Loads one entry with its tags.
    fn get_entry(&self, id: EntryId, include_deleted: bool) -> RepoResult<Option<JournalEntry>>;
    /// Lists entries using scope, sort, tag filter and pagination.
    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<JournalEntry>>;
    /// Counts entries in one scope.
    fn count_entries(&self, scope: EntryScope) -> RepoResult<u64>;
    /// Replaces the full tag set of one entry in a single transaction.
    fn set_entry_tags(&self, id: EntryId, tag_ids: &[TagId]) -> RepoResult<()>;
    /// Erases one entry and its tag associations from storage.
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
    /// Erases every soft-deleted entry. Returns the number of removed rows.
    fn delete_trashed_entries(&self) -> RepoResult<usize>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn insert_entry(&self, entry: &JournalEntry) -> RepoResult<EntryId> {
        entry.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let location = entry.location.as_ref();
        tx.execute(
            "INSERT INTO journal_entries (
                id,
                content,
                mood,
                created_at,
                updated_at,
                is_deleted,
                deleted_at,
                location_name,
                latitude,
                longitude
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                entry.id.to_string(),
                entry.content.as_str(),
                entry.mood.as_str(),
                entry.created_at,
                entry.updated_at,
                bool_to_int(entry.is_deleted),
                entry.deleted_at,
                location.map(Location::name),
                location.map(Location::latitude),
                location.map(Location::longitude),
            ],
        )?;

        let tag_ids: Vec<TagId> = entry.tags.iter().map(|tag| tag.id).collect();
        link_tags_in_tx(&tx, entry.id, &tag_ids)?;
        tx.commit()?;

        Ok(entry.id)
    }

    fn update_entry(&self, entry: &JournalEntry) -> RepoResult<()> {
        entry.validate()?;

        let location = entry.location.as_ref();
        let changed = self.conn.execute(
            "UPDATE journal_entries
             SET
                content = ?1,
                mood = ?2,
                updated_at = ?3,
                is_deleted = ?4,
                deleted_at = ?5,
                location_name = ?6,
                latitude = ?7,
                longitude = ?8
             WHERE id = ?9;",
            params![
                entry.content.as_str(),
                entry.mood.as_str(),
                entry.updated_at,
                bool_to_int(entry.is_deleted),
                entry.deleted_at,
                location.map(Location::name),
                location.map(Location::latitude),
                location.map(Location::longitude),
                entry.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::EntryNotFound(entry.id));
        }

        Ok(())
    }

    fn get_entry(&self, id: EntryId, include_deleted: bool) -> RepoResult<Option<JournalEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE id = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            let mut entry = parse_entry_row(row)?;
            entry.tags = load_entry_tags(self.conn, entry.id)?;
            return Ok(Some(entry));
        }

        Ok(None)
    }

    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<JournalEntry>> {
        let mut sql = format!("{ENTRY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        sql.push_str(scope_filter_sql(query.scope));

        if let Some(tag_id) = query.tag_id {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1
                    FROM entry_tags et
                    WHERE et.entry_id = journal_entries.id
                      AND et.tag_id = ?
                )",
            );
            bind_values.push(Value::Text(tag_id.to_string()));
        }

        let sort_column = match query.sort_by {
            EntrySortKey::CreatedAt => "created_at",
            EntrySortKey::UpdatedAt => "updated_at",
            EntrySortKey::Mood => MOOD_RANK_SQL,
            EntrySortKey::DeletedAt => "deleted_at",
        };
        let direction = match query.order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        sql.push_str(&format!(" ORDER BY {sort_column} {direction}, rowid {direction}"));

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(normalize_entry_limit(limit))));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        for entry in &mut entries {
            entry.tags = load_entry_tags(self.conn, entry.id)?;
        }

        Ok(entries)
    }

    fn count_entries(&self, scope: EntryScope) -> RepoResult<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM journal_entries WHERE 1 = 1{};",
            scope_filter_sql(scope)
        );
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative entry count `{count}`")))
    }

    fn set_entry_tags(&self, id: EntryId, tag_ids: &[TagId]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let exists: i64 = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM journal_entries WHERE id = ?1);",
            [id.to_string()],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::EntryNotFound(id));
        }

        tx.execute(
            "DELETE FROM entry_tags WHERE entry_id = ?1;",
            [id.to_string()],
        )?;
        link_tags_in_tx(&tx, id, tag_ids)?;
        tx.commit()?;
        Ok(())
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM journal_entries WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::EntryNotFound(id));
        }

        Ok(())
    }

    fn delete_trashed_entries(&self) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM journal_entries WHERE is_deleted = 1;", [])?;
        Ok(removed)
    }
}

/// Clamps an explicit page size to the listing contract.
pub fn normalize_entry_limit(limit: u32) -> u32 {
    match limit {
        0 => ENTRY_LIST_DEFAULT_LIMIT,
        value if value > ENTRY_LIST_LIMIT_MAX => ENTRY_LIST_LIMIT_MAX,
        value => value,
    }
}

fn scope_filter_sql(scope: EntryScope) -> &'static str {
    match scope {
        EntryScope::Active => " AND is_deleted = 0",
        EntryScope::Trashed => " AND is_deleted = 1",
        EntryScope::All => "",
    }
}

fn link_tags_in_tx(tx: &Transaction<'_>, entry_id: EntryId, tag_ids: &[TagId]) -> RepoResult<()> {
    let entry_id_text = entry_id.to_string();
    for tag_id in tag_ids {
        let tag_id_text = tag_id.to_string();
        let exists: i64 = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM tags WHERE id = ?1);",
            [tag_id_text.as_str()],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::TagNotFound(*tag_id));
        }

        tx.execute(
            "INSERT OR IGNORE INTO entry_tags (entry_id, tag_id) VALUES (?1, ?2);",
            params![entry_id_text.as_str(), tag_id_text.as_str()],
        )?;
    }
    Ok(())
}

fn load_entry_tags(conn: &Connection, entry_id: EntryId) -> RepoResult<Vec<Tag>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TAG_COLUMNS_SQL}
         FROM entry_tags et
         INNER JOIN tags t ON t.id = et.tag_id
         WHERE et.entry_id = ?1
         ORDER BY t.name COLLATE NOCASE ASC, t.id ASC;"
    ))?;
    let mut rows = stmt.query([entry_id.to_string()])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(parse_tag_row(row)?);
    }
    Ok(tags)
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<JournalEntry> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "journal_entries.id")?;

    let mood_text: String = row.get("mood")?;
    let mood = Mood::parse(&mood_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid mood `{mood_text}` in journal_entries.mood"))
    })?;

    let location = match (
        row.get::<_, Option<String>>("location_name")?,
        row.get::<_, Option<f64>>("latitude")?,
        row.get::<_, Option<f64>>("longitude")?,
    ) {
        (None, None, None) => None,
        (Some(name), Some(latitude), Some(longitude)) => Some(
            Location::try_new(name, latitude, longitude)
                .map_err(|err| RepoError::Validation(err.into()))?,
        ),
        _ => {
            return Err(RepoError::InvalidData(format!(
                "partial location in journal_entries row `{id_text}`"
            )));
        }
    };

    let entry = JournalEntry {
        id,
        content: row.get("content")?,
        mood,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        is_deleted: parse_flag(row.get("is_deleted")?, "journal_entries.is_deleted")?,
        deleted_at: row.get("deleted_at")?,
        location,
        tags: Vec::new(),
    };
    entry.validate()?;
    Ok(entry)
}

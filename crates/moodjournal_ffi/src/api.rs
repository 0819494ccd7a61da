//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level journal functions to Dart via FRB.
//! - Flatten core types into plain envelopes the generated bindings can carry.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through `ok=false` plus a diagnostic message.
//! - Entry ids cross the boundary as hyphenated UUID strings.

use chrono::{DateTime, Local, TimeZone};
use log::warn;
use moodjournal_core::db::open_db;
use moodjournal_core::repo::entry_repo::normalize_entry_limit;
use moodjournal_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EntryListQuery, EntryScope, EntryService, EntrySortKey, JournalEntry, Location, Mood,
    NewEntryRequest, SortOrder, SqliteEntryRepository, SqliteTagRepository, TagService,
};
use rusqlite::Connection;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const JOURNAL_DB_FILE_NAME: &str = "moodjournal.sqlite3";
static JOURNAL_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type SqliteEntryService<'conn> =
    EntryService<SqliteEntryRepository<'conn>, SqliteTagRepository<'conn>>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for entry commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected entry ID.
    pub entry_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, entry_id: Uuid) -> Self {
        Self {
            ok: true,
            entry_id: Some(entry_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("event=ffi_call module=ffi status=error message={message}");
        Self {
            ok: false,
            entry_id: None,
            message,
        }
    }
}

/// Result of the startup hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapResponse {
    pub ok: bool,
    /// Catalog was seeded by an earlier launch.
    pub already_seeded: bool,
    pub categories_created: u32,
    pub tags_created: u32,
    pub message: String,
}

/// One journal entry flattened for list rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryItem {
    pub entry_id: String,
    pub content: String,
    /// First 100 characters of content, with `...` when truncated.
    pub preview: String,
    /// Lowercase mood key (`terrible|bad|okay|good|excellent`).
    pub mood: String,
    pub mood_emoji: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub is_deleted: bool,
    pub deleted_at_ms: Option<i64>,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub tag_names: Vec<String>,
    pub word_count: u32,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryListResponse {
    pub ok: bool,
    pub items: Vec<EntryItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagItem {
    pub tag_id: String,
    pub name: String,
    pub icon: String,
    pub is_automatic: bool,
    pub is_predefined: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCategoryItem {
    pub category_id: String,
    pub name: String,
    pub icon: String,
    pub color_hex: Option<String>,
    pub is_system_category: bool,
    pub tags: Vec<TagItem>,
}

/// Catalog response envelope, categories in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCatalogResponse {
    pub ok: bool,
    pub categories: Vec<TagCategoryItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoodShareItem {
    pub mood: String,
    pub mood_emoji: String,
    pub count: u32,
    pub percentage: f64,
}

/// Stats screen envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodStatsResponse {
    pub ok: bool,
    pub total_entries: u32,
    pub entries_this_week: u32,
    pub average_mood: Option<f64>,
    /// One decimal, or `N/A` without entries.
    pub average_mood_text: String,
    pub distribution: Vec<MoodShareItem>,
    pub message: String,
}

/// Seeds the predefined tag catalog. Call once after `init_logging` on launch.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Idempotent across launches.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn app_bootstrap() -> BootstrapResponse {
    let result = with_connection(|conn| {
        let repo = SqliteTagRepository::try_new(conn).map_err(to_message)?;
        TagService::new(repo)
            .seed_predefined_catalog()
            .map_err(to_message)
    });
    match result {
        Ok(report) => BootstrapResponse {
            ok: true,
            already_seeded: report.already_seeded,
            categories_created: saturating_u32(report.categories_created),
            tags_created: saturating_u32(report.tags_created),
            message: if report.already_seeded {
                "Catalog already seeded.".to_string()
            } else {
                "Catalog seeded.".to_string()
            },
        },
        Err(err) => {
            warn!("event=app_bootstrap module=ffi status=error");
            BootstrapResponse {
                ok: false,
                already_seeded: false,
                categories_created: 0,
                tags_created: 0,
                message: format!("app_bootstrap failed: {err}"),
            }
        }
    }
}

/// Creates one entry from the editor save action.
///
/// Input semantics:
/// - `mood`: lowercase mood key, case-insensitive.
/// - A location needs name, latitude and longitude; a partial triplet means
///   "no location". A complete but invalid triplet fails the call.
/// - `tag_names`: predefined catalog tag names; unknown names are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_create(
    content: String,
    mood: String,
    location_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    tag_names: Vec<String>,
) -> EntryActionResponse {
    let Some(mood) = Mood::parse(&mood) else {
        return EntryActionResponse::failure(format!("entry_create failed: unknown mood `{mood}`"));
    };
    let location = match Location::from_parts(location_name, latitude, longitude) {
        Ok(location) => location,
        Err(err) => return EntryActionResponse::failure(format!("entry_create failed: {err}")),
    };
    let mut request = NewEntryRequest::new(content, mood);
    request.location = location;
    request.tag_names = tag_names;

    match with_entry_service(|service| service.create_entry(request).map_err(to_message)) {
        Ok(entry) => EntryActionResponse::success("Entry created.", entry.id),
        Err(err) => EntryActionResponse::failure(format!("entry_create failed: {err}")),
    }
}

/// Replaces content and mood of one active entry.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_update(entry_id: String, content: String, mood: String) -> EntryActionResponse {
    let Some(mood) = Mood::parse(&mood) else {
        return EntryActionResponse::failure(format!("entry_update failed: unknown mood `{mood}`"));
    };
    run_entry_command("entry_update", "Entry updated.", &entry_id, |service, id| {
        service
            .update_entry(id, content, mood)
            .map(|_| ())
            .map_err(to_message)
    })
}

/// Moves one entry to the trash. Trashing twice succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_trash(entry_id: String) -> EntryActionResponse {
    run_entry_command("entry_trash", "Entry moved to trash.", &entry_id, |service, id| {
        service.move_to_trash(id).map(|_| ()).map_err(to_message)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn entry_restore(entry_id: String) -> EntryActionResponse {
    run_entry_command("entry_restore", "Entry restored.", &entry_id, |service, id| {
        service.restore(id).map(|_| ()).map_err(to_message)
    })
}

/// Erases one entry and its tag associations. Not reversible.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete_permanently(entry_id: String) -> EntryActionResponse {
    run_entry_command(
        "entry_delete_permanently",
        "Entry deleted.",
        &entry_id,
        |service, id| service.permanently_delete(id).map_err(to_message),
    )
}

/// Lists entries for the home and trash screens.
///
/// Input semantics:
/// - `scope`: `active|trashed|all`.
/// - `sort_by`: `created_at|updated_at|mood|deleted_at`.
/// - `order`: `asc|desc`.
/// - `limit`: `None` lists every row; `Some(0)` uses the default page size.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_list(
    scope: String,
    sort_by: String,
    order: String,
    limit: Option<u32>,
) -> EntryListResponse {
    let query = match parse_list_query(&scope, &sort_by, &order, limit) {
        Ok(query) => query,
        Err(err) => {
            return EntryListResponse {
                ok: false,
                items: Vec::new(),
                message: format!("entries_list failed: {err}"),
            };
        }
    };

    match with_entry_service(|service| service.list_entries(&query).map_err(to_message)) {
        Ok(entries) => {
            let items: Vec<_> = entries.iter().map(to_entry_item).collect();
            let message = if items.is_empty() {
                "No entries.".to_string()
            } else {
                format!("Found {} entries.", items.len())
            };
            EntryListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => EntryListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("entries_list failed: {err}"),
        },
    }
}

/// Lists every tag category with its tags.
#[flutter_rust_bridge::frb(sync)]
pub fn tag_catalog() -> TagCatalogResponse {
    let result = with_connection(|conn| {
        let repo = SqliteTagRepository::try_new(conn).map_err(to_message)?;
        TagService::new(repo).list_catalog().map_err(to_message)
    });
    match result {
        Ok(catalog) => TagCatalogResponse {
            ok: true,
            categories: catalog
                .into_iter()
                .map(|group| TagCategoryItem {
                    category_id: group.category.id.to_string(),
                    name: group.category.name,
                    icon: group.category.icon,
                    color_hex: group.category.color_hex,
                    is_system_category: group.category.is_system_category,
                    tags: group
                        .tags
                        .into_iter()
                        .map(|tag| TagItem {
                            tag_id: tag.id.to_string(),
                            name: tag.name,
                            icon: tag.icon,
                            is_automatic: tag.is_automatic,
                            is_predefined: tag.is_predefined,
                        })
                        .collect(),
                })
                .collect(),
            message: String::new(),
        },
        Err(err) => TagCatalogResponse {
            ok: false,
            categories: Vec::new(),
            message: format!("tag_catalog failed: {err}"),
        },
    }
}

/// Computes stats over active entries.
///
/// `now_epoch_ms` defaults to the current time. Calendar arithmetic uses the
/// device's local time zone.
#[flutter_rust_bridge::frb(sync)]
pub fn mood_stats(now_epoch_ms: Option<i64>) -> MoodStatsResponse {
    let now = match resolve_now(now_epoch_ms) {
        Ok(now) => now,
        Err(err) => return mood_stats_failure(err),
    };

    match with_entry_service(|service| service.stats(&now).map_err(to_message)) {
        Ok(stats) => MoodStatsResponse {
            ok: true,
            total_entries: saturating_u32(stats.total_entries),
            entries_this_week: saturating_u32(stats.entries_this_week),
            average_mood: stats.average_mood,
            average_mood_text: stats.average_mood_text(),
            distribution: stats
                .distribution
                .iter()
                .map(|share| MoodShareItem {
                    mood: share.mood.as_str().to_string(),
                    mood_emoji: share.mood.emoji().to_string(),
                    count: saturating_u32(share.count),
                    percentage: share.percentage,
                })
                .collect(),
            message: String::new(),
        },
        Err(err) => mood_stats_failure(err),
    }
}

fn mood_stats_failure(err: String) -> MoodStatsResponse {
    MoodStatsResponse {
        ok: false,
        total_entries: 0,
        entries_this_week: 0,
        average_mood: None,
        average_mood_text: String::new(),
        distribution: Vec::new(),
        message: format!("mood_stats failed: {err}"),
    }
}

fn resolve_now(now_epoch_ms: Option<i64>) -> Result<DateTime<Local>, String> {
    match now_epoch_ms {
        None => Ok(Local::now()),
        Some(ms) => Local
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| format!("now_epoch_ms {ms} is out of range")),
    }
}

fn parse_list_query(
    scope: &str,
    sort_by: &str,
    order: &str,
    limit: Option<u32>,
) -> Result<EntryListQuery, String> {
    let scope = match scope.trim().to_ascii_lowercase().as_str() {
        "" | "active" => EntryScope::Active,
        "trashed" | "trash" => EntryScope::Trashed,
        "all" => EntryScope::All,
        other => return Err(format!("unsupported scope `{other}`")),
    };
    let sort_by = match sort_by.trim().to_ascii_lowercase().as_str() {
        "" | "created_at" => EntrySortKey::CreatedAt,
        "updated_at" => EntrySortKey::UpdatedAt,
        "mood" => EntrySortKey::Mood,
        "deleted_at" => EntrySortKey::DeletedAt,
        other => return Err(format!("unsupported sort key `{other}`")),
    };
    let order = match order.trim().to_ascii_lowercase().as_str() {
        "" | "desc" => SortOrder::Descending,
        "asc" => SortOrder::Ascending,
        other => return Err(format!("unsupported sort order `{other}`")),
    };
    Ok(EntryListQuery {
        scope,
        sort_by,
        order,
        tag_id: None,
        limit: limit.map(normalize_entry_limit),
        offset: 0,
    })
}

fn run_entry_command(
    operation: &str,
    success_message: &str,
    entry_id: &str,
    command: impl FnOnce(&SqliteEntryService<'_>, Uuid) -> Result<(), String>,
) -> EntryActionResponse {
    let id = match parse_entry_id(entry_id) {
        Ok(id) => id,
        Err(err) => return EntryActionResponse::failure(format!("{operation} failed: {err}")),
    };
    match with_entry_service(|service| command(service, id)) {
        Ok(()) => EntryActionResponse::success(success_message, id),
        Err(err) => EntryActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn parse_entry_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|err| format!("invalid entry id `{value}`: {err}"))
}

fn resolve_journal_db_path() -> PathBuf {
    JOURNAL_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("MOODJOURNAL_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(JOURNAL_DB_FILE_NAME)
        })
        .clone()
}

fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let db_path = resolve_journal_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("journal DB open failed: {err}"))?;
    f(&conn)
}

fn with_entry_service<T>(
    f: impl FnOnce(&SqliteEntryService<'_>) -> Result<T, String>,
) -> Result<T, String> {
    with_connection(|conn| {
        let entries = SqliteEntryRepository::try_new(conn)
            .map_err(|err| format!("entry repo init failed: {err}"))?;
        let tags = SqliteTagRepository::try_new(conn)
            .map_err(|err| format!("tag repo init failed: {err}"))?;
        f(&EntryService::new(entries, tags))
    })
}

fn to_message(err: impl Display) -> String {
    err.to_string()
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_entry_item(entry: &JournalEntry) -> EntryItem {
    let location = entry.location.as_ref();
    EntryItem {
        entry_id: entry.id.to_string(),
        content: entry.content.clone(),
        preview: entry.preview_text(),
        mood: entry.mood.as_str().to_string(),
        mood_emoji: entry.mood.emoji().to_string(),
        created_at_ms: entry.created_at,
        updated_at_ms: entry.updated_at,
        is_deleted: entry.is_deleted,
        deleted_at_ms: entry.deleted_at,
        location_name: location.map(|value| value.name().to_string()),
        latitude: location.map(Location::latitude),
        longitude: location.map(Location::longitude),
        tag_names: entry.tag_names().into_iter().map(str::to_string).collect(),
        word_count: saturating_u32(entry.word_count()),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        app_bootstrap, core_version, entries_list, entry_create, entry_delete_permanently,
        entry_restore, entry_trash, entry_update, init_logging, mood_stats, parse_list_query,
        ping, tag_catalog,
    };
    use moodjournal_core::db::open_db;
    use moodjournal_core::{EntryScope, EntrySortKey, SortOrder};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn list_query_parsing_accepts_defaults_and_rejects_unknown() {
        let query = parse_list_query("", "", "", None).unwrap();
        assert_eq!(query.scope, EntryScope::Active);
        assert_eq!(query.sort_by, EntrySortKey::CreatedAt);
        assert_eq!(query.order, SortOrder::Descending);
        assert_eq!(query.limit, None);

        let query = parse_list_query("Trashed", "mood", "ASC", Some(9_999)).unwrap();
        assert_eq!(query.scope, EntryScope::Trashed);
        assert_eq!(query.sort_by, EntrySortKey::Mood);
        assert_eq!(query.order, SortOrder::Ascending);
        assert_eq!(query.limit, Some(500));

        let query = parse_list_query("trashed", "deleted_at", "desc", None).unwrap();
        assert_eq!(query.sort_by, EntrySortKey::DeletedAt);

        assert!(parse_list_query("archived", "", "", None).is_err());
        assert!(parse_list_query("", "title", "", None).is_err());
    }

    #[test]
    fn entry_lifecycle_through_ffi() {
        let token = unique_token("ffi-lifecycle");
        let created = entry_create(
            format!("walked the dog {token}"),
            "good".to_string(),
            Some("Park".to_string()),
            Some(51.5),
            Some(-0.12),
            Vec::new(),
        );
        assert!(created.ok, "{}", created.message);
        let entry_id = created.entry_id.expect("create should return entry_id");

        let active = entries_list("active".into(), "created_at".into(), "desc".into(), None);
        assert!(active.ok, "{}", active.message);
        let item = active
            .items
            .iter()
            .find(|item| item.entry_id == entry_id)
            .expect("created entry should be listed");
        assert_eq!(item.mood, "good");
        assert_eq!(item.word_count, 4);
        assert_eq!(item.location_name.as_deref(), Some("Park"));
        assert!(item.tag_names.iter().any(|name| name == "Location"));

        let updated = entry_update(entry_id.clone(), format!("edited {token}"), "Excellent".into());
        assert!(updated.ok, "{}", updated.message);

        assert!(entry_trash(entry_id.clone()).ok);
        assert!(entry_trash(entry_id.clone()).ok);
        let trashed = entries_list("trashed".into(), String::new(), String::new(), None);
        assert!(trashed.items.iter().any(|item| item.entry_id == entry_id));
        let active = entries_list("active".into(), String::new(), String::new(), None);
        assert!(!active.items.iter().any(|item| item.entry_id == entry_id));

        assert!(entry_restore(entry_id.clone()).ok);
        let deleted = entry_delete_permanently(entry_id.clone());
        assert!(deleted.ok, "{}", deleted.message);

        let conn = open_db(super::resolve_journal_db_path()).expect("open db");
        let (rows, links): (i64, i64) = conn
            .query_row(
                "SELECT
                    (SELECT COUNT(*) FROM journal_entries WHERE id = ?1),
                    (SELECT COUNT(*) FROM entry_tags WHERE entry_id = ?1);",
                [entry_id.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .expect("query entry rows");
        assert_eq!(rows, 0);
        assert_eq!(links, 0);

        let again = entry_delete_permanently(entry_id);
        assert!(!again.ok);
        assert!(again.message.contains("not found"));
    }

    #[test]
    fn entry_create_drops_partial_location() {
        let created = entry_create(
            unique_token("ffi-partial-location"),
            "okay".to_string(),
            Some("Nowhere".to_string()),
            None,
            Some(10.0),
            Vec::new(),
        );
        assert!(created.ok, "{}", created.message);
        let entry_id = created.entry_id.unwrap();

        let listed = entries_list("all".into(), String::new(), String::new(), None);
        let item = listed
            .items
            .iter()
            .find(|item| item.entry_id == entry_id)
            .unwrap();
        assert_eq!(item.location_name, None);
        assert_eq!(item.latitude, None);
    }

    #[test]
    fn entry_create_rejects_out_of_range_location() {
        let content = unique_token("ffi-bad-location");
        let created = entry_create(
            content.clone(),
            "good".to_string(),
            Some("Somewhere".to_string()),
            Some(120.0),
            Some(10.0),
            Vec::new(),
        );
        assert!(!created.ok);
        assert_eq!(created.entry_id, None);
        assert!(created.message.contains("latitude 120"));

        let listed = entries_list("all".into(), String::new(), String::new(), None);
        assert!(!listed.items.iter().any(|item| item.content == content));
    }

    #[test]
    fn entry_commands_reject_bad_input() {
        let bad_mood = entry_create("x".into(), "ecstatic".into(), None, None, None, Vec::new());
        assert!(!bad_mood.ok);
        assert!(bad_mood.message.contains("unknown mood"));

        let bad_id = entry_trash("not-a-uuid".to_string());
        assert!(!bad_id.ok);
        assert!(bad_id.message.contains("invalid entry id"));

        let missing = entry_restore(uuid::Uuid::new_v4().to_string());
        assert!(!missing.ok);
    }

    #[test]
    fn bootstrap_seeds_catalog_once() {
        let first = app_bootstrap();
        assert!(first.ok, "{}", first.message);
        let second = app_bootstrap();
        assert!(second.ok, "{}", second.message);
        assert!(second.already_seeded);
        assert_eq!(second.tags_created, 0);

        let catalog = tag_catalog();
        assert!(catalog.ok, "{}", catalog.message);
        let names: Vec<_> = catalog
            .categories
            .iter()
            .filter(|category| category.is_system_category)
            .map(|category| category.name.as_str())
            .collect();
        assert_eq!(names, vec!["Weather", "Emotions", "Activities", "People"]);

        let created = entry_create(
            unique_token("ffi-tagged"),
            "bad".to_string(),
            None,
            None,
            None,
            vec!["rainy".to_string()],
        );
        assert!(created.ok, "{}", created.message);
        let entry_id = created.entry_id.unwrap();
        let listed = entries_list("active".into(), String::new(), String::new(), None);
        let item = listed
            .items
            .iter()
            .find(|item| item.entry_id == entry_id)
            .unwrap();
        assert!(item.tag_names.iter().any(|name| name == "Rainy"));
    }

    #[test]
    fn mood_stats_reports_five_distribution_rows() {
        let created = entry_create(
            unique_token("ffi-stats"),
            "terrible".to_string(),
            None,
            None,
            None,
            Vec::new(),
        );
        assert!(created.ok, "{}", created.message);

        let stats = mood_stats(None);
        assert!(stats.ok, "{}", stats.message);
        assert!(stats.total_entries >= 1);
        assert!(stats.entries_this_week >= 1);
        assert_eq!(stats.distribution.len(), 5);
        assert_eq!(stats.distribution[0].mood, "terrible");
        assert!(stats.distribution[0].count >= 1);
        assert_ne!(stats.average_mood_text, "N/A");

        let out_of_range = mood_stats(Some(i64::MAX));
        assert!(!out_of_range.ok);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}

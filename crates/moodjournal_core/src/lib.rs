//! Core domain logic for MoodJournal.
//! This crate is the single source of truth for journal business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stats;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::catalog::{find_predefined_tag, predefined_categories, CatalogCategory};
pub use model::entry::{EntryId, EntryValidationError, JournalEntry, Location, LocationError};
pub use model::mood::{Mood, MoodColor};
pub use model::tag::{AutomaticTag, CategoryId, Tag, TagCategory, TagData, TagId};
pub use repo::entry_repo::{
    EntryListQuery, EntryRepository, EntryScope, EntrySortKey, SortOrder, SqliteEntryRepository,
};
pub use repo::tag_repo::{SqliteTagRepository, TagRepository};
pub use repo::{RepoError, RepoResult};
pub use service::entry_service::{EntryService, EntryServiceError, NewEntryRequest};
pub use service::tag_service::{CategoryWithTags, SeedReport, TagService, TagServiceError};
pub use stats::{DailyMoodSummary, MoodShare, MoodStats};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

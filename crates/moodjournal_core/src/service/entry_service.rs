//! Journal entry use-case service.
//!
//! # Responsibility
//! - Create entries with automatic and user-selected predefined tags.
//! - Drive the edit, trash, restore and permanent delete lifecycle.
//! - Provide the explicit read API used by list, trash and stats screens.
//!
//! # Invariants
//! - Every mutation is read back from the store before returning.
//! - Automatic tags are resolved through `ensure_automatic_tag` only.
//! - Entry content is never written to logs.

use crate::model::catalog::find_predefined_tag;
use crate::model::entry::{EntryId, JournalEntry, Location};
use crate::model::mood::Mood;
use crate::model::tag::{AutomaticTag, Tag, TagId};
use crate::repo::entry_repo::{
    EntryListQuery, EntryRepository, EntryScope, EntrySortKey, SortOrder,
};
use crate::repo::tag_repo::TagRepository;
use crate::repo::{RepoError, RepoResult};
use crate::stats::{daily_mood_summaries, DailyMoodSummary, MoodStats};
use chrono::{DateTime, TimeZone};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for entry use-cases.
#[derive(Debug)]
pub enum EntryServiceError {
    EntryNotFound(EntryId),
    TagNotFound(TagId),
    /// Persistence-layer failure, passed through unmodified.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for EntryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryNotFound(id) => write!(f, "journal entry not found: {id}"),
            Self::TagNotFound(id) => write!(f, "tag not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent entry state: {details}"),
        }
    }
}

impl Error for EntryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EntryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::EntryNotFound(id) => Self::EntryNotFound(id),
            RepoError::TagNotFound(id) => Self::TagNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Input for the editor save action on a new entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntryRequest {
    pub content: String,
    pub mood: Mood,
    pub location: Option<Location>,
    /// Names of predefined catalog tags picked in the editor.
    pub tag_names: Vec<String>,
    /// Attach the automatic "Text"/"Location" tags when they apply.
    pub auto_tag: bool,
}

impl NewEntryRequest {
    /// Request with no location, no selected tags and automatic tagging on.
    pub fn new(content: impl Into<String>, mood: Mood) -> Self {
        Self {
            content: content.into(),
            mood,
            location: None,
            tag_names: Vec::new(),
            auto_tag: true,
        }
    }
}

/// Entry service facade over entry and tag repositories.
pub struct EntryService<E: EntryRepository, T: TagRepository> {
    entries: E,
    tags: T,
}

impl<E: EntryRepository, T: TagRepository> EntryService<E, T> {
    pub fn new(entries: E, tags: T) -> Self {
        Self { entries, tags }
    }

    /// Creates one entry and attaches its tags.
    pub fn create_entry(&self, request: NewEntryRequest) -> Result<JournalEntry, EntryServiceError> {
        let mut entry = JournalEntry::new(request.content, request.mood, request.location);

        let mut tags: Vec<Tag> = Vec::new();
        if request.auto_tag {
            if entry.has_text() {
                tags.push(self.tags.ensure_automatic_tag(AutomaticTag::Text)?);
            }
            if entry.has_location() {
                tags.push(self.tags.ensure_automatic_tag(AutomaticTag::Location)?);
            }
        }
        for name in &request.tag_names {
            match self.resolve_predefined_tag(name)? {
                Some(tag) => tags.push(tag),
                None => debug!(
                    "event=entry_create module=entry_service status=tag_skipped reason=unknown_predefined_tag"
                ),
            }
        }
        tags.sort_by(|a, b| a.id.cmp(&b.id));
        tags.dedup_by(|a, b| a.id == b.id);
        entry.tags = tags;

        let entry_id = self.entries.insert_entry(&entry)?;
        info!(
            "event=entry_create module=entry_service status=ok entry_id={entry_id} mood={} tag_count={} has_location={}",
            entry.mood.as_str(),
            entry.tags.len(),
            entry.has_location()
        );
        self.read_back(entry_id, false, "created entry not found in read-back")
    }

    /// Editor save action on an existing entry: replaces content and mood.
    pub fn update_entry(
        &self,
        id: EntryId,
        content: impl Into<String>,
        mood: Mood,
    ) -> Result<JournalEntry, EntryServiceError> {
        let mut entry = self.require_active(id)?;
        entry.update_content(content);
        entry.update_mood(mood);
        self.entries.update_entry(&entry)?;
        debug!("event=entry_update module=entry_service status=ok entry_id={id}");
        self.read_back(id, false, "updated entry not found in read-back")
    }

    pub fn update_content(
        &self,
        id: EntryId,
        content: impl Into<String>,
    ) -> Result<JournalEntry, EntryServiceError> {
        let mut entry = self.require_active(id)?;
        entry.update_content(content);
        self.entries.update_entry(&entry)?;
        self.read_back(id, false, "updated entry not found in read-back")
    }

    pub fn update_mood(&self, id: EntryId, mood: Mood) -> Result<JournalEntry, EntryServiceError> {
        let mut entry = self.require_active(id)?;
        entry.update_mood(mood);
        self.entries.update_entry(&entry)?;
        self.read_back(id, false, "updated entry not found in read-back")
    }

    /// Replaces the full tag set of one entry.
    pub fn set_entry_tags(
        &self,
        id: EntryId,
        tag_ids: &[TagId],
    ) -> Result<JournalEntry, EntryServiceError> {
        self.entries.set_entry_tags(id, tag_ids)?;
        self.read_back(id, true, "entry missing after tag replacement")
    }

    /// Soft-deletes one entry. Trashing a trashed entry changes nothing.
    pub fn move_to_trash(&self, id: EntryId) -> Result<JournalEntry, EntryServiceError> {
        let mut entry = self.require_any(id)?;
        if entry.is_deleted {
            return Ok(entry);
        }
        entry.move_to_trash();
        self.entries.update_entry(&entry)?;
        info!("event=entry_trash module=entry_service status=ok entry_id={id}");
        self.read_back(id, true, "trashed entry not found in read-back")
    }

    /// Brings one entry back from the trash. No-op for active entries.
    pub fn restore(&self, id: EntryId) -> Result<JournalEntry, EntryServiceError> {
        let mut entry = self.require_any(id)?;
        if entry.is_active() {
            return Ok(entry);
        }
        entry.restore();
        self.entries.update_entry(&entry)?;
        info!("event=entry_restore module=entry_service status=ok entry_id={id}");
        self.read_back(id, false, "restored entry not found in read-back")
    }

    /// Erases one entry, trashed or not, together with its tag associations.
    ///
    /// Tags stay in the store. The id is never handed out again.
    pub fn permanently_delete(&self, id: EntryId) -> Result<(), EntryServiceError> {
        self.entries.delete_entry(id)?;
        info!("event=entry_purge module=entry_service status=ok entry_id={id}");
        Ok(())
    }

    /// Erases every trashed entry. Returns the number removed.
    pub fn empty_trash(&self) -> Result<usize, EntryServiceError> {
        let removed = self.entries.delete_trashed_entries()?;
        info!("event=trash_empty module=entry_service status=ok removed={removed}");
        Ok(removed)
    }

    /// Gets one active entry.
    pub fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        self.entries.get_entry(id, false)
    }

    /// Active entries sorted as requested; the home list uses `CreatedAt` / `Descending`.
    pub fn list_active(
        &self,
        sort_by: EntrySortKey,
        order: SortOrder,
    ) -> RepoResult<Vec<JournalEntry>> {
        self.entries
            .list_entries(&EntryListQuery::active(sort_by, order))
    }

    pub fn list_trashed(&self) -> RepoResult<Vec<JournalEntry>> {
        self.entries.list_entries(&EntryListQuery::trashed())
    }

    pub fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<JournalEntry>> {
        self.entries.list_entries(query)
    }

    pub fn count_active(&self) -> RepoResult<u64> {
        self.entries.count_entries(EntryScope::Active)
    }

    /// Statistics over every active entry relative to `now`.
    pub fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> RepoResult<MoodStats> {
        let entries = self.entries.list_entries(&EntryListQuery::default())?;
        Ok(MoodStats::compute(&entries, now))
    }

    /// Per-day mood summaries over every active entry.
    pub fn daily_summaries<Tz: TimeZone>(&self, tz: &Tz) -> RepoResult<Vec<DailyMoodSummary>> {
        let entries = self.entries.list_entries(&EntryListQuery::default())?;
        Ok(daily_mood_summaries(&entries, tz))
    }

    fn resolve_predefined_tag(&self, name: &str) -> RepoResult<Option<Tag>> {
        let Some((category, tag_data)) = find_predefined_tag(name) else {
            return Ok(None);
        };
        let Some(category) = self.tags.find_category_by_name(category.name, true)? else {
            return Ok(None);
        };
        self.tags.find_tag_in_category(category.id, tag_data.name)
    }

    fn require_active(&self, id: EntryId) -> Result<JournalEntry, EntryServiceError> {
        self.entries
            .get_entry(id, false)?
            .ok_or(EntryServiceError::EntryNotFound(id))
    }

    fn require_any(&self, id: EntryId) -> Result<JournalEntry, EntryServiceError> {
        self.entries
            .get_entry(id, true)?
            .ok_or(EntryServiceError::EntryNotFound(id))
    }

    fn read_back(
        &self,
        id: EntryId,
        include_deleted: bool,
        details: &'static str,
    ) -> Result<JournalEntry, EntryServiceError> {
        self.entries
            .get_entry(id, include_deleted)?
            .ok_or(EntryServiceError::InconsistentState(details))
    }
}

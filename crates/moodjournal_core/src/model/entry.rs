//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the central journal record and its location value object.
//! - Provide lifecycle helpers for edit and soft-delete semantics.
//! - Derive read-only projections (`has_text`, `preview_text`, `word_count`).
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - `deleted_at.is_some()` iff `is_deleted`.
//! - A location is either fully present or absent; partial state is unrepresentable.

use super::mood::Mood;
use super::now_epoch_ms;
use super::tag::Tag;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Maximum number of characters kept by [`JournalEntry::preview_text`].
pub const PREVIEW_MAX_CHARS: usize = 100;
const PREVIEW_ELLIPSIS: &str = "...";

pub type EntryId = Uuid;

/// Validation failures for location values.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    BlankName,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl Display for LocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "location name cannot be blank"),
            Self::LatitudeOutOfRange(value) => {
                write!(f, "latitude {value} must be within [-90, 90]")
            }
            Self::LongitudeOutOfRange(value) => {
                write!(f, "longitude {value} must be within [-180, 180]")
            }
        }
    }
}

impl Error for LocationError {}

/// Named geographic point attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawLocation {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawLocation> for Location {
    type Error = LocationError;

    fn try_from(value: RawLocation) -> Result<Self, Self::Error> {
        Self::try_new(value.name, value.latitude, value.longitude)
    }
}

impl Location {
    /// Creates a validated location. The name is stored trimmed.
    pub fn try_new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, LocationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(LocationError::BlankName);
        }
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            name,
            latitude,
            longitude,
        })
    }

    /// Collapses three independently optional parts into one optional value.
    ///
    /// A missing part normalizes to "no location". A complete triplet must
    /// pass [`Location::try_new`].
    pub fn from_parts(
        name: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, LocationError> {
        match (name, latitude, longitude) {
            (Some(name), Some(latitude), Some(longitude)) => {
                Self::try_new(name, latitude, longitude).map(Some)
            }
            _ => Ok(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Validation failures for persisted or imported entries.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    NilId,
    DeletedAtWithoutDeletedFlag,
    DeletedFlagWithoutDeletedAt,
    Location(LocationError),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "entry id must not be nil"),
            Self::DeletedAtWithoutDeletedFlag => {
                write!(f, "deleted_at is set but is_deleted is false")
            }
            Self::DeletedFlagWithoutDeletedAt => {
                write!(f, "is_deleted is true but deleted_at is missing")
            }
            Self::Location(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EntryValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Location(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LocationError> for EntryValidationError {
    fn from(value: LocationError) -> Self {
        Self::Location(value)
    }
}

/// One dated journal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub content: String,
    pub mood: Mood,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Bumped by content/mood edits.
    pub updated_at: i64,
    /// Soft delete flag. Trashed entries are hidden from default listings.
    pub is_deleted: bool,
    /// Unix epoch milliseconds of the trash action.
    pub deleted_at: Option<i64>,
    pub location: Option<Location>,
    /// Associated tags, ordered by tag name.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl JournalEntry {
    /// Creates a new active entry with a generated id.
    ///
    /// `created_at` and `updated_at` share the same instant.
    pub fn new(content: impl Into<String>, mood: Mood, location: Option<Location>) -> Self {
        let now = now_epoch_ms();
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            mood,
            created_at: now,
            updated_at: now,
            is_deleted: false,
            deleted_at: None,
            location,
            tags: Vec::new(),
        }
    }

    /// Creates a new entry with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: EntryId,
        content: impl Into<String>,
        mood: Mood,
        location: Option<Location>,
    ) -> Result<Self, EntryValidationError> {
        let mut entry = Self::new(content, mood, location);
        entry.id = id;
        entry.validate()?;
        Ok(entry)
    }

    /// Validates cross-field invariants.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.id.is_nil() {
            return Err(EntryValidationError::NilId);
        }
        match (self.is_deleted, self.deleted_at) {
            (false, Some(_)) => Err(EntryValidationError::DeletedAtWithoutDeletedFlag),
            (true, None) => Err(EntryValidationError::DeletedFlagWithoutDeletedAt),
            _ => Ok(()),
        }
    }

    /// Replaces content and bumps `updated_at`. Empty content is allowed.
    pub fn update_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.touch();
    }

    /// Replaces mood and bumps `updated_at`.
    pub fn update_mood(&mut self, mood: Mood) {
        self.mood = mood;
        self.touch();
    }

    /// Soft-deletes the entry. A second call keeps the original `deleted_at`.
    pub fn move_to_trash(&mut self) {
        if self.is_deleted {
            return;
        }
        self.is_deleted = true;
        self.deleted_at = Some(now_epoch_ms());
    }

    /// Clears the soft-delete state. No-op for active entries.
    pub fn restore(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }

    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    pub fn has_text(&self) -> bool {
        !self.content.trim().is_empty()
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    /// First 100 characters of content, with `...` appended when truncated.
    pub fn preview_text(&self) -> String {
        preview_text(&self.content)
    }

    /// Number of whitespace-delimited tokens in content.
    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }

    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.name.as_str()).collect()
    }

    fn touch(&mut self) {
        // Keep updated_at monotonic even if the wall clock steps back.
        self.updated_at = now_epoch_ms().max(self.updated_at);
    }
}

/// Truncates on a `char` boundary so multi-byte text never splits.
pub fn preview_text(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_MAX_CHARS) {
        None => content.to_string(),
        Some((byte_index, _)) => {
            let mut preview = content[..byte_index].to_string();
            preview.push_str(PREVIEW_ELLIPSIS);
            preview
        }
    }
}

pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::{preview_text, word_count, PREVIEW_MAX_CHARS};

    #[test]
    fn preview_keeps_short_content_unchanged() {
        let exact = "a".repeat(PREVIEW_MAX_CHARS);
        assert_eq!(preview_text(&exact), exact);
        assert_eq!(preview_text(""), "");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let source = "é".repeat(PREVIEW_MAX_CHARS + 5);
        let preview = preview_text(&source);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS + 3);
        assert!(preview.starts_with(&"é".repeat(PREVIEW_MAX_CHARS)));
    }

    #[test]
    fn word_count_ignores_whitespace_runs() {
        assert_eq!(word_count("  Walked \n the\tdog  "), 3);
        assert_eq!(word_count(" \n "), 0);
    }
}

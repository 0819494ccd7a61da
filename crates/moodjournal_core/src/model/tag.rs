//! Tag and tag category domain model.
//!
//! # Responsibility
//! - Define user/system labels and the categories that group them.
//! - Describe the automatic (system-applied) tag kinds.
//!
//! # Invariants
//! - `id` is stable and never reused for another tag/category.
//! - Tag names are stored trimmed with inner whitespace collapsed.
//! - Uniqueness is not enforced here; repositories provide find-or-create.

use super::now_epoch_ms;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Default icon for user-created tags.
pub const DEFAULT_TAG_ICON: &str = "tag.fill";

pub type TagId = Uuid;
pub type CategoryId = Uuid;

/// Label attachable to any number of journal entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// Symbol name resolved by the UI icon set.
    pub icon: String,
    /// Applied by the system to signal a content property.
    pub is_automatic: bool,
    /// Seeded from the predefined catalog and offered for selection.
    pub is_predefined: bool,
    /// Owning category. Deleting the category deletes the tag.
    pub category_id: Option<CategoryId>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Tag {
    /// Allocates a new tag with a generated id.
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        is_automatic: bool,
        is_predefined: bool,
        category_id: Option<CategoryId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            is_automatic,
            is_predefined,
            category_id,
            created_at: now_epoch_ms(),
        }
    }

    /// Builds a fresh tag for one automatic kind.
    pub fn automatic(kind: AutomaticTag) -> Self {
        Self::new(kind.name(), kind.icon(), true, false, None)
    }
}

/// Named group of tags (Weather, Emotions, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCategory {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
    /// Optional `#RRGGBB` accent.
    pub color_hex: Option<String>,
    /// Seeded by the app; `TagService::delete_category` refuses to remove it.
    pub is_system_category: bool,
    /// Ascending display order.
    pub sort_order: i64,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl TagCategory {
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        color_hex: Option<String>,
        is_system_category: bool,
        sort_order: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            color_hex,
            is_system_category,
            sort_order,
            created_at: now_epoch_ms(),
        }
    }
}

/// Name + icon pair used by the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagData {
    pub name: &'static str,
    pub icon: &'static str,
}

/// System-applied tag kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomaticTag {
    /// Entry has non-blank text.
    Text,
    /// Entry carries a location.
    Location,
    /// Entry carries a photo. Defined for the tag store only.
    Photo,
}

impl AutomaticTag {
    pub const ALL: [AutomaticTag; 3] = [
        AutomaticTag::Text,
        AutomaticTag::Location,
        AutomaticTag::Photo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Location => "Location",
            Self::Photo => "Photo",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Text => "text.alignleft",
            Self::Location => "location.fill",
            Self::Photo => "photo.fill",
        }
    }
}

/// Normalizes a user-supplied tag or category name.
///
/// Returns `None` for blank input. Inner whitespace runs collapse to one space.
pub fn normalize_tag_name(name: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(name.trim(), " ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_tag_name, AutomaticTag, Tag};

    #[test]
    fn normalize_collapses_whitespace_and_rejects_blank() {
        assert_eq!(
            normalize_tag_name("  Morning \t  run \n").as_deref(),
            Some("Morning run")
        );
        assert_eq!(normalize_tag_name(" \n\t "), None);
    }

    #[test]
    fn automatic_tag_uses_kind_metadata() {
        let tag = Tag::automatic(AutomaticTag::Location);
        assert_eq!(tag.name, "Location");
        assert_eq!(tag.icon, "location.fill");
        assert!(tag.is_automatic);
        assert!(!tag.is_predefined);
        assert_eq!(tag.category_id, None);
    }
}

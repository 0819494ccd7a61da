//! Predefined tag catalog used to seed system categories on first launch.
//!
//! # Invariants
//! - Category sort orders are 1..=4 in declaration order.
//! - Tag names are unique within one category.

use super::tag::TagData;

/// One system category together with its ordered seed tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCategory {
    pub name: &'static str,
    pub icon: &'static str,
    pub sort_order: i64,
    pub tags: &'static [TagData],
}

const fn tag(name: &'static str, icon: &'static str) -> TagData {
    TagData { name, icon }
}

pub const WEATHER_TAGS: &[TagData] = &[
    tag("Sunny", "sun.max.fill"),
    tag("Cloudy", "cloud.fill"),
    tag("Rainy", "cloud.rain.fill"),
    tag("Snowy", "snowflake"),
    tag("Stormy", "cloud.bolt.fill"),
    tag("Windy", "wind"),
    tag("Foggy", "cloud.fog.fill"),
];

pub const EMOTION_TAGS: &[TagData] = &[
    tag("Happy", "face.smiling"),
    tag("Sad", "cloud.rain"),
    tag("Anxious", "bolt.heart.fill"),
    tag("Excited", "star.fill"),
    tag("Calm", "leaf.fill"),
    tag("Angry", "flame.fill"),
    tag("Grateful", "heart.fill"),
    tag("Stressed", "exclamationmark.triangle.fill"),
    tag("Peaceful", "sparkles"),
    tag("Lonely", "person.fill"),
];

pub const ACTIVITY_TAGS: &[TagData] = &[
    tag("Exercise", "figure.run"),
    tag("Reading", "book.fill"),
    tag("Gaming", "gamecontroller.fill"),
    tag("Music", "music.note"),
    tag("Cooking", "frying.pan.fill"),
    tag("Socializing", "person.2.fill"),
    tag("Working", "briefcase.fill"),
    tag("Studying", "graduationcap.fill"),
    tag("Shopping", "cart.fill"),
    tag("Traveling", "airplane"),
    tag("Meditation", "sparkles"),
    tag("Walking", "figure.walk"),
];

pub const PEOPLE_TAGS: &[TagData] = &[
    tag("Friends", "person.2.fill"),
    tag("Family", "house.fill"),
    tag("Partner", "heart.fill"),
    tag("Colleagues", "briefcase.fill"),
    tag("Alone", "person.fill"),
    tag("Pet", "pawprint.fill"),
];

const CATALOG: &[CatalogCategory] = &[
    CatalogCategory {
        name: "Weather",
        icon: "cloud.sun.fill",
        sort_order: 1,
        tags: WEATHER_TAGS,
    },
    CatalogCategory {
        name: "Emotions",
        icon: "heart.fill",
        sort_order: 2,
        tags: EMOTION_TAGS,
    },
    CatalogCategory {
        name: "Activities",
        icon: "figure.run",
        sort_order: 3,
        tags: ACTIVITY_TAGS,
    },
    CatalogCategory {
        name: "People",
        icon: "person.2.fill",
        sort_order: 4,
        tags: PEOPLE_TAGS,
    },
];

/// Returns the four system categories in display order.
pub fn predefined_categories() -> &'static [CatalogCategory] {
    CATALOG
}

/// Looks up a predefined tag by case-insensitive name.
///
/// Returns the owning category together with the tag data.
pub fn find_predefined_tag(name: &str) -> Option<(&'static CatalogCategory, TagData)> {
    let needle = name.trim();
    CATALOG.iter().find_map(|category| {
        category
            .tags
            .iter()
            .find(|tag| tag.name.eq_ignore_ascii_case(needle))
            .map(|tag| (category, *tag))
    })
}

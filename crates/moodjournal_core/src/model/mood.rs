//! Mood scale model.
//!
//! # Responsibility
//! - Define the closed 5-point mood enumeration.
//! - Provide display metadata used by every UI projection.
//!
//! # Invariants
//! - `Mood::ALL` order is terrible -> excellent and never changes.
//! - `numeric_value()` is strictly increasing along `Mood::ALL` (1..=5).

use serde::{Deserialize, Serialize};

/// Five-point emotional state scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Terrible,
    Bad,
    Okay,
    Good,
    Excellent,
}

/// Color token used by UI layers to tint mood-related widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

impl MoodColor {
    /// Stable lowercase token name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl Mood {
    /// All variants in scale order.
    pub const ALL: [Mood; 5] = [
        Mood::Terrible,
        Mood::Bad,
        Mood::Okay,
        Mood::Good,
        Mood::Excellent,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Terrible => "Terrible",
            Self::Bad => "Bad",
            Self::Okay => "Okay",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Terrible => "\u{1F622}",
            Self::Bad => "\u{1F615}",
            Self::Okay => "\u{1F610}",
            Self::Good => "\u{1F642}",
            Self::Excellent => "\u{1F604}",
        }
    }

    pub fn color(self) -> MoodColor {
        match self {
            Self::Terrible => MoodColor::Red,
            Self::Bad => MoodColor::Orange,
            Self::Okay => MoodColor::Yellow,
            Self::Good => MoodColor::Green,
            Self::Excellent => MoodColor::Blue,
        }
    }

    /// Position on the 1..=5 scale.
    pub fn numeric_value(self) -> u8 {
        match self {
            Self::Terrible => 1,
            Self::Bad => 2,
            Self::Okay => 3,
            Self::Good => 4,
            Self::Excellent => 5,
        }
    }

    /// Inverse of [`Mood::numeric_value`].
    pub fn from_numeric_value(value: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mood| mood.numeric_value() == value)
    }

    /// Storage/wire token (`terrible|bad|okay|good|excellent`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Terrible => "terrible",
            Self::Bad => "bad",
            Self::Okay => "okay",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }

    /// Parses a storage token. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "terrible" => Some(Self::Terrible),
            "bad" => Some(Self::Bad),
            "okay" => Some(Self::Okay),
            "good" => Some(Self::Good),
            "excellent" => Some(Self::Excellent),
            _ => None,
        }
    }
}

impl Default for Mood {
    /// The editor starts on the neutral mood.
    fn default() -> Self {
        Self::Okay
    }
}

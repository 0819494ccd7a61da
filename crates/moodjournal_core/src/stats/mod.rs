//! Statistics projections over journal entries.
//!
//! # Responsibility
//! - Aggregate counts, averages and per-mood distribution for the stats screen.
//! - Group entries by local calendar day for the calendar screen.
//!
//! # Invariants
//! - All functions are pure; soft-deleted entries never contribute.
//! - Empty input degrades to zeroed/sentinel output, never a division by zero.

pub mod mood_stats;

pub use mood_stats::{
    average_mood, daily_mood_summaries, entries_since_week_start, format_average_mood,
    mood_distribution, week_window_start, DailyMoodSummary, MoodShare, MoodStats,
    AVERAGE_MOOD_EMPTY,
};

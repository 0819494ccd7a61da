//! Mood statistics aggregation.

use crate::model::entry::JournalEntry;
use crate::model::mood::Mood;
use chrono::{DateTime, Days, Duration, NaiveDate, NaiveDateTime, Offset, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;

/// Rendered in place of an average when there are no entries.
pub const AVERAGE_MOOD_EMPTY: &str = "N/A";

const WEEK_DAYS: u64 = 7;
const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Count and share of one mood.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodShare {
    pub mood: Mood,
    pub count: usize,
    /// 0..=100. Zero when there are no entries.
    pub percentage: f64,
}

/// Snapshot rendered by the stats screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodStats {
    pub total_entries: usize,
    /// Entries created within the last 7 calendar days.
    pub entries_this_week: usize,
    /// Mean scale value, `None` when there are no entries.
    pub average_mood: Option<f64>,
    /// One row per mood in scale order.
    pub distribution: Vec<MoodShare>,
}

impl MoodStats {
    /// Computes every statistic relative to `now`.
    ///
    /// `now` carries the time zone used for calendar-day arithmetic.
    pub fn compute<Tz: TimeZone>(entries: &[JournalEntry], now: &DateTime<Tz>) -> Self {
        let active: Vec<&JournalEntry> = entries.iter().filter(|entry| entry.is_active()).collect();
        Self {
            total_entries: active.len(),
            entries_this_week: entries_since_week_start(entries, now),
            average_mood: average_mood(entries),
            distribution: mood_distribution(entries),
        }
    }

    /// One-decimal average, or `N/A`.
    pub fn average_mood_text(&self) -> String {
        format_average_mood(self.average_mood)
    }
}

/// Start of the "this week" window: `now` minus 7 calendar days, in epoch ms.
///
/// A shifted local time that falls into a DST gap moves forward by the gap
/// length. Ambiguous local times resolve to the earlier instant.
pub fn week_window_start<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    let tz = now.timezone();
    now.naive_local()
        .checked_sub_days(Days::new(WEEK_DAYS))
        .and_then(|naive| local_to_epoch_ms(&tz, naive))
        .unwrap_or_else(|| now.timestamp_millis() - WEEK_DAYS as i64 * MS_PER_DAY)
}

fn local_to_epoch_ms<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<i64> {
    if let Some(resolved) = tz.from_local_datetime(&naive).earliest() {
        return Some(resolved.timestamp_millis());
    }
    // Inside a gap: read the wall time with the offset in effect before it.
    let before_gap = naive.checked_sub_signed(Duration::days(1))?;
    let offset = tz.offset_from_local_datetime(&before_gap).earliest()?.fix();
    let utc = naive.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
    Some(utc.and_utc().timestamp_millis())
}

/// Counts active entries with `created_at >= week_window_start(now)`.
pub fn entries_since_week_start<Tz: TimeZone>(entries: &[JournalEntry], now: &DateTime<Tz>) -> usize {
    let window_start = week_window_start(now);
    entries
        .iter()
        .filter(|entry| entry.is_active() && entry.created_at >= window_start)
        .count()
}

/// Mean mood scale value of active entries.
pub fn average_mood(entries: &[JournalEntry]) -> Option<f64> {
    let (sum, count) = entries
        .iter()
        .filter(|entry| entry.is_active())
        .fold((0u64, 0u64), |(sum, count), entry| {
            (sum + u64::from(entry.mood.numeric_value()), count + 1)
        });
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

pub fn format_average_mood(average: Option<f64>) -> String {
    match average {
        Some(value) => format!("{value:.1}"),
        None => AVERAGE_MOOD_EMPTY.to_string(),
    }
}

/// Per-mood counts and percentages in scale order.
pub fn mood_distribution(entries: &[JournalEntry]) -> Vec<MoodShare> {
    let counts = count_by_mood(entries.iter().filter(|entry| entry.is_active()));
    let total: usize = counts.iter().sum();
    Mood::ALL
        .iter()
        .zip(counts)
        .map(|(mood, count)| MoodShare {
            mood: *mood,
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect()
}

/// Mood aggregate for one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMoodSummary {
    pub date: NaiveDate,
    pub entry_count: usize,
    pub average_mood: f64,
    /// Most frequent mood of the day; ties go to the higher mood.
    pub dominant_mood: Mood,
}

/// Groups active entries by the local calendar day of `created_at`.
///
/// Output is sorted by date ascending and contains only days with entries.
pub fn daily_mood_summaries<Tz: TimeZone>(entries: &[JournalEntry], tz: &Tz) -> Vec<DailyMoodSummary> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&JournalEntry>> = BTreeMap::new();
    for entry in entries.iter().filter(|entry| entry.is_active()) {
        if let Some(created) = tz.timestamp_millis_opt(entry.created_at).single() {
            by_day.entry(created.date_naive()).or_default().push(entry);
        }
    }

    by_day
        .into_iter()
        .map(|(date, day_entries)| {
            let counts = count_by_mood(day_entries.iter().copied());
            let sum: u64 = day_entries
                .iter()
                .map(|entry| u64::from(entry.mood.numeric_value()))
                .sum();
            let dominant_mood = Mood::ALL
                .iter()
                .zip(counts)
                .max_by_key(|(mood, count)| (*count, mood.numeric_value()))
                .map_or(Mood::default(), |(mood, _)| *mood);
            DailyMoodSummary {
                date,
                entry_count: day_entries.len(),
                average_mood: sum as f64 / day_entries.len() as f64,
                dominant_mood,
            }
        })
        .collect()
}

fn count_by_mood<'a>(entries: impl Iterator<Item = &'a JournalEntry>) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for entry in entries {
        counts[usize::from(entry.mood.numeric_value() - 1)] += 1;
    }
    counts
}

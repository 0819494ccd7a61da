//! Journal domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Hold the static predefined tag catalog.
//!
//! # Invariants
//! - Every entry, tag and category is identified by a stable UUID.
//! - Entry deletion is a soft-delete tombstone until explicitly purged.
//! - Timestamps are Unix epoch milliseconds.

pub mod catalog;
pub mod entry;
pub mod mood;
pub mod tag;

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

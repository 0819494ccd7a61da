//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented store contracts for entries and tags.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Entry writes must pass `JournalEntry::validate()` before persistence.
//! - Repository APIs return semantic errors (`*NotFound`) in addition to DB
//!   transport errors.
//! - Repositories only accept connections migrated to the latest schema.

pub mod entry_repo;
mod error;
mod sqlite_util;
pub mod tag_repo;

pub use error::{RepoError, RepoResult};

//! Question bank operations.
//!
//! [`QuestionBank`] drives the load → change → save → sync cycle on top of
//! [`qbank_persistence::QuestionStore`]. [`filter`] holds the pure query
//! helpers and [`sync`] the best-effort remote backup.

pub mod bank;
pub mod error;
pub mod filter;
pub mod sync;

pub use bank::{ActionOutcome, PendingDelete, QuestionBank, SyncStatus};
pub use error::{BankError, Result};
pub use filter::{ALL, QuestionFilter, available_subjects, available_topics, with_all_choice};
pub use sync::{GitSync, GitSyncError, SyncBackend, SyncOutcome};

//! Persistent storage for the question bank.
//!
//! Questions are kept in a single JSON file holding an array of records:
//!
//! ```text
//! [
//!     {
//!         "id": 1,
//!         "text": "...",
//!         "image_b64": null,
//!         "subject": "Physics",
//!         "topic": "Kinematics",
//!         "created_at": "2024-03-29T10:30:00+00:00"
//!     }
//! ]
//! ```
//!
//! # Features
//!
//! - **Fail-open loading**: a missing, empty or corrupt file reads as an
//!   empty collection so new questions can always be added
//! - **Atomic writes**: the new content is fully written to a temp file
//!   before it replaces the old one
//! - **Canonical output**: stable field order, four-space indentation
//!
//! # Example
//!
//! ```ignore
//! use qbank_persistence::QuestionStore;
//!
//! let store = QuestionStore::new("questions.json");
//! let mut questions = store.load();
//! questions.insert(QuestionDraft::new("State Newton's first law."), Utc::now())?;
//! store.save(&questions)?;
//! ```

mod error;
mod io;
mod store;

pub use error::{PersistenceError, Result};
pub use io::{load_questions, save_questions, serialize_questions, temp_path_for};
pub use store::{DEFAULT_DATA_FILE, QuestionStore};

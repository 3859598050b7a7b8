//! File I/O operations for question persistence.
//!
//! This module handles:
//! - Saving the collection with atomic writes
//! - Loading the collection with format validation

mod load;
mod save;

pub use load::load_questions;
pub use save::{save_questions, serialize_questions, temp_path_for};

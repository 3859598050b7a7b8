//! Question file loading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use qbank_model::QuestionCollection;

use crate::error::{PersistenceError, Result};

/// Load the question collection from a JSON file.
///
/// A missing file or one holding only whitespace is an empty collection.
/// Anything else that is not a JSON array of questions is an error; callers
/// that must never fail use [`crate::QuestionStore::load`] instead.
pub fn load_questions(path: &Path) -> Result<QuestionCollection> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No question file at {}, starting empty", path.display());
            return Ok(QuestionCollection::new());
        }
        Err(e) => {
            return Err(PersistenceError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    parse_questions(&content, path)
}

fn parse_questions(content: &str, path: &Path) -> Result<QuestionCollection> {
    if content.trim().is_empty() {
        tracing::debug!("Question file {} is empty", path.display());
        return Ok(QuestionCollection::new());
    }

    let questions: QuestionCollection =
        serde_json::from_str(content).map_err(|e| PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(
        "Loaded {} questions from {}",
        questions.len(),
        path.display()
    );
    Ok(questions)
}

//! Question file saving.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use qbank_model::QuestionCollection;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{PersistenceError, Result};

const INDENT: &[u8] = b"    ";

/// Save the complete collection to a JSON file.
///
/// The content is serialized in full, written to a temp file next to the
/// target and synced, then renamed over the target. A failure at any step
/// leaves the existing file as it was.
pub fn save_questions(questions: &QuestionCollection, path: &Path) -> Result<()> {
    // Serialize before touching the filesystem
    let bytes = serialize_questions(questions)?;

    let temp_path = temp_path_for(path);

    // Create parent directory if needed
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("Saved {} questions to {}", questions.len(), path.display());
    Ok(())
}

/// Serialize the collection in canonical form.
///
/// Records keep their struct field order and are indented by four spaces.
pub fn serialize_questions(questions: &QuestionCollection) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut output, PrettyFormatter::with_indent(INDENT));
    questions
        .serialize(&mut serializer)
        .map_err(|e| PersistenceError::Serialization { source: e })?;
    Ok(output)
}

/// Sibling path used while writing `path`: the file name plus `.tmp`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("questions.json"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use qbank_model::QuestionDraft;
    use tempfile::tempdir;

    fn sample() -> QuestionCollection {
        let mut questions = QuestionCollection::new();
        questions
            .insert(
                QuestionDraft::new("Sketch a velocity-time graph.")
                    .with_subject("Physics")
                    .with_topic("Kinematics")
                    .with_image(b"fake image".to_vec()),
                Utc.with_ymd_and_hms(2024, 3, 29, 10, 30, 0).unwrap(),
            )
            .unwrap();
        questions
    }

    #[test]
    fn test_save_writes_canonical_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.json");

        save_questions(&sample(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let expected = r#"[
    {
        "id": 1,
        "text": "Sketch a velocity-time graph.",
        "image_b64": "ZmFrZSBpbWFnZQ==",
        "subject": "Physics",
        "topic": "Kinematics",
        "created_at": "2024-03-29T10:30:00+00:00"
    }
]"#;
        assert_eq!(content, expected);
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_save_empty_collection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.json");
        save_questions(&QuestionCollection::new(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/data/questions.json");
        save_questions(&sample(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_failed_save_keeps_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.json");
        fs::write(&path, "[]").unwrap();

        // A directory squatting on the temp path makes the write fail
        fs::create_dir(temp_path_for(&path)).unwrap();

        let result = save_questions(&sample(), &path);
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_temp_path_for() {
        assert_eq!(
            temp_path_for(Path::new("/data/questions.json")),
            PathBuf::from("/data/questions.json.tmp")
        );
        assert_eq!(
            temp_path_for(Path::new("bank")),
            PathBuf::from("bank.tmp")
        );
    }
}

//! The question store: one backing file, fail-open reads, atomic writes.

use std::path::{Path, PathBuf};

use qbank_model::QuestionCollection;

use crate::error::Result;
use crate::io::{load_questions, save_questions};

/// Default backing file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "questions.json";

/// File-backed question store.
///
/// Holds no state besides the path; every call goes to disk. Concurrent
/// writers to the same file are not coordinated.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection, degrading to an empty one on any failure.
    ///
    /// Read and parse errors are logged and swallowed so a damaged file never
    /// blocks adding new questions. Duplicate ids are renumbered.
    pub fn load(&self) -> QuestionCollection {
        match self.try_load() {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "{}; continuing with an empty question list",
                    e.user_message()
                );
                QuestionCollection::new()
            }
        }
    }

    /// Load the collection, reporting read and parse errors.
    pub fn try_load(&self) -> Result<QuestionCollection> {
        let mut questions = load_questions(&self.path)?;
        for fix in questions.repair_duplicate_ids() {
            tracing::warn!(
                position = fix.position,
                old_id = fix.old_id,
                new_id = fix.new_id,
                "Duplicate question id renumbered"
            );
        }
        Ok(questions)
    }

    /// Persist the complete collection.
    ///
    /// On error nothing on disk has changed.
    pub fn save(&self, questions: &QuestionCollection) -> Result<()> {
        save_questions(questions, &self.path)
    }

    /// Id the next added question receives, or an error once ids run out.
    pub fn next_id(&self, questions: &QuestionCollection) -> qbank_model::Result<u64> {
        questions.next_id()
    }

    /// Create the backing file holding an empty array when it is missing.
    ///
    /// Failure is logged; the first successful save creates the file anyway.
    pub fn ensure_exists(&self) {
        if self.path.exists() {
            return;
        }
        match save_questions(&QuestionCollection::new(), &self.path) {
            Ok(()) => tracing::info!("Created empty question file at {}", self.path.display()),
            Err(e) => tracing::warn!(error = %e, "{}", e.user_message()),
        }
    }
}

impl Default for QuestionStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use qbank_model::{Question, QuestionDraft};
    use std::fs;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> QuestionStore {
        QuestionStore::new(dir.join("questions.json"))
    }

    #[test]
    fn test_load_corrupt_file_returns_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), "[{\"id\": 1, ").unwrap();

        assert!(store.try_load().is_err());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_unreadable_path_returns_empty() {
        let dir = tempdir().unwrap();
        let store = QuestionStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_add_after_corrupt_file_recovers() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), "not json").unwrap();

        let mut questions = store.load();
        questions
            .insert(QuestionDraft::new("Fresh start"), Utc::now())
            .unwrap();
        store.save(&questions).unwrap();

        let reloaded = store.try_load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.as_slice()[0].id(), 1);
    }

    #[test]
    fn test_load_repairs_duplicate_ids() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(
            store.path(),
            r#"[
                {"id": 1, "text": "a", "image_b64": null, "subject": "", "topic": "", "created_at": "2024-01-01T00:00:00"},
                {"id": 1, "text": "b", "image_b64": null, "subject": "", "topic": "", "created_at": "2024-01-01T00:00:00"}
            ]"#,
        )
        .unwrap();

        let questions = store.load();
        let ids: Vec<u64> = questions.iter().map(Question::id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_next_id_after_deleting_highest() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let mut questions = QuestionCollection::new();
        for text in ["a", "b", "c"] {
            questions.insert(QuestionDraft::new(text), Utc::now()).unwrap();
        }
        questions.remove(3);
        store.save(&questions).unwrap();

        let reloaded = store.load();
        assert_eq!(store.next_id(&reloaded), Ok(3));
        questions.remove(1);
        assert_eq!(store.next_id(&questions), Ok(3));
    }

    #[test]
    fn test_ensure_exists_creates_empty_array() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.ensure_exists();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");

        // Existing content is left alone
        fs::write(store.path(), "[ ]").unwrap();
        store.ensure_exists();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[ ]");
    }

    fn draft_strategy() -> impl Strategy<Value = QuestionDraft> {
        (
            "[a-zA-Z0-9 ?]{1,40}",
            prop_oneof![Just(String::new()), "[A-Za-z]{1,12}"],
            prop_oneof![Just(String::new()), "[A-Za-z]{1,12}"],
            proptest::option::of(proptest::collection::vec(any::<u8>(), 0..64)),
        )
            .prop_filter("text must not be blank", |(text, ..)| {
                !text.trim().is_empty()
            })
            .prop_map(|(text, subject, topic, image)| QuestionDraft {
                text,
                subject,
                topic,
                image,
            })
    }

    proptest! {
        #[test]
        fn prop_save_load_save_is_stable(drafts in proptest::collection::vec(draft_strategy(), 0..8)) {
            let dir = tempdir().unwrap();
            let store = store_in(dir.path());
            let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

            let mut questions = QuestionCollection::new();
            for draft in drafts {
                questions.insert(draft, created_at).unwrap();
            }

            store.save(&questions).unwrap();
            let first = fs::read(store.path()).unwrap();
            let loaded = store.try_load().unwrap();
            prop_assert_eq!(&loaded, &questions);

            store.save(&loaded).unwrap();
            let second = fs::read(store.path()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

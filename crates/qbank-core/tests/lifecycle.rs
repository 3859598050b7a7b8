#![allow(missing_docs)]

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use qbank_core::{ALL, QuestionBank, QuestionFilter, SyncBackend, SyncOutcome, SyncStatus};
use qbank_model::{QuestionDraft, QuestionEdit};
use qbank_persistence::QuestionStore;
use tempfile::tempdir;

#[derive(Clone, Default)]
struct Journal(Rc<RefCell<Vec<String>>>);

impl SyncBackend for Journal {
    fn sync(&self, commit_message: &str) -> SyncOutcome {
        self.0.borrow_mut().push(commit_message.to_string());
        SyncOutcome::succeeded("ok")
    }
}

#[test]
fn test_add_edit_filter_delete_cycle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bank").join("questions.json");
    let journal = Journal::default();
    let bank = QuestionBank::new(QuestionStore::new(&path)).with_sync(Box::new(journal.clone()));

    let first = bank
        .add(
            QuestionDraft::new("Solve for x: 2x + 3 = 7")
                .with_subject("Maths")
                .with_topic("Algebra"),
        )
        .unwrap();
    assert_eq!(first.value.id(), 1);
    assert!(matches!(first.sync, SyncStatus::Synced(_)));

    bank.add(
        QuestionDraft::new("Name the noble gases")
            .with_subject("Chemistry")
            .with_topic("Periodic table"),
    )
    .unwrap();
    bank.add(
        QuestionDraft::new("Factorise x^2 - 9")
            .with_subject("Maths")
            .with_topic("Algebra"),
    )
    .unwrap();

    assert_eq!(bank.subject_choices(), vec![ALL, "Chemistry", "Maths"]);
    assert_eq!(bank.topic_choices(), vec![ALL, "Algebra", "Periodic table"]);

    let maths: Vec<u64> = bank
        .search(&QuestionFilter::new().with_subject("Maths").with_search_text("X"))
        .iter()
        .map(|q| q.id())
        .collect();
    assert_eq!(maths, vec![1, 3]);

    let edited = bank
        .update(
            2,
            QuestionEdit {
                topic: Some("Groups".to_string()),
                ..QuestionEdit::default()
            },
        )
        .unwrap();
    assert_eq!(edited.value.topic(), "Groups");
    assert_eq!(edited.value.text(), "Name the noble gases");

    let pending = bank.request_delete(3).unwrap();
    assert_eq!(pending.question().text(), "Factorise x^2 - 9");
    bank.confirm_delete(pending).unwrap();

    let again = bank.add(QuestionDraft::new("Balance H2 + O2")).unwrap();
    assert_eq!(again.value.id(), 3);

    let ids: Vec<u64> = bank.questions().iter().map(|q| q.id()).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let messages = journal.0.borrow();
    let actions: Vec<&str> = messages
        .iter()
        .map(|m| m.split(" - ").next().unwrap_or_default())
        .collect();
    assert_eq!(
        actions,
        vec![
            "Add question 1",
            "Add question 2",
            "Add question 3",
            "Update question 2",
            "Delete question 3",
            "Add question 3",
        ]
    );

    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("\"image_b64\": null"));
}

#[test]
fn test_damaged_file_does_not_block_adding() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("questions.json");
    fs::write(&path, "not json at all").unwrap();
    let bank = QuestionBank::new(QuestionStore::new(&path));

    assert!(bank.questions().is_empty());
    let added = bank.add(QuestionDraft::new("Fresh start")).unwrap();
    assert_eq!(added.value.id(), 1);
    assert_eq!(added.sync, SyncStatus::Skipped);
    assert_eq!(bank.questions().len(), 1);
}

//! Question bank operations.
//!
//! Each mutating call runs one full cycle: load the current file, apply the
//! change, save the whole collection, then hand the file to the sync backend.

use chrono::Utc;
use qbank_model::{Question, QuestionCollection, QuestionDraft, QuestionEdit};
use qbank_persistence::QuestionStore;

use crate::error::{BankError, Result};
use crate::filter::{self, QuestionFilter};
use crate::sync::{SyncBackend, SyncOutcome};

/// What happened to the remote copy after a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// No backend configured.
    Skipped,
    Synced(String),
    Failed(String),
}

impl From<SyncOutcome> for SyncStatus {
    fn from(outcome: SyncOutcome) -> Self {
        if outcome.success {
            SyncStatus::Synced(outcome.message)
        } else {
            SyncStatus::Failed(outcome.message)
        }
    }
}

/// A completed, saved action and the state of its sync.
#[derive(Debug, Clone)]
pub struct ActionOutcome<T> {
    pub value: T,
    pub sync: SyncStatus,
}

impl<T> ActionOutcome<T> {
    /// Message to show when the save succeeded but the sync did not.
    pub fn sync_warning(&self) -> Option<String> {
        match &self.sync {
            SyncStatus::Failed(message) => {
                Some(format!("Saved locally, but the backup push failed: {message}"))
            }
            _ => None,
        }
    }
}

/// First half of a two-step delete.
///
/// Obtained from [`QuestionBank::request_delete`] and consumed by
/// [`QuestionBank::confirm_delete`]; dropping it cancels the delete.
#[derive(Debug)]
#[must_use = "a pending delete does nothing until confirmed"]
pub struct PendingDelete {
    question: Question,
}

impl PendingDelete {
    pub fn id(&self) -> u64 {
        self.question.id()
    }

    /// The question as it was when the delete was requested.
    pub fn question(&self) -> &Question {
        &self.question
    }
}

/// The question bank service.
pub struct QuestionBank {
    store: QuestionStore,
    sync: Option<Box<dyn SyncBackend>>,
}

impl QuestionBank {
    pub fn new(store: QuestionStore) -> Self {
        Self { store, sync: None }
    }

    #[must_use]
    pub fn with_sync(mut self, backend: Box<dyn SyncBackend>) -> Self {
        self.sync = Some(backend);
        self
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    /// Current questions; empty if the file is missing or damaged.
    pub fn questions(&self) -> QuestionCollection {
        self.store.load()
    }

    /// Questions matching `filter`, in stored order.
    pub fn search(&self, filter: &QuestionFilter) -> Vec<Question> {
        let questions = self.questions();
        filter.apply(&questions).into_iter().cloned().collect()
    }

    pub fn subject_choices(&self) -> Vec<String> {
        filter::with_all_choice(filter::available_subjects(&self.questions()))
    }

    pub fn topic_choices(&self) -> Vec<String> {
        filter::with_all_choice(filter::available_topics(&self.questions()))
    }

    /// Add a question. It gets `max(id) + 1` and the current time.
    pub fn add(&self, draft: QuestionDraft) -> Result<ActionOutcome<Question>> {
        draft.validate()?;
        let mut questions = self.store.load();
        let added = questions.insert(draft, Utc::now())?.clone();
        tracing::info!(id = added.id(), "Adding question");
        let sync = self.persist(&questions, "Add", added.id())?;
        Ok(ActionOutcome { value: added, sync })
    }

    /// Edit a question in place; its id and creation time are kept.
    pub fn update(&self, id: u64, edit: QuestionEdit) -> Result<ActionOutcome<Question>> {
        let mut questions = self.store.load();
        let updated = questions.update(id, edit)?.clone();
        tracing::info!(id, "Updating question");
        let sync = self.persist(&questions, "Update", id)?;
        Ok(ActionOutcome {
            value: updated,
            sync,
        })
    }

    /// Look up the question to delete. Nothing changes until confirmed.
    pub fn request_delete(&self, id: u64) -> Result<PendingDelete> {
        let questions = self.store.load();
        let question = questions.get(id).ok_or(BankError::NotFound { id })?;
        tracing::debug!(id, "Delete requested");
        Ok(PendingDelete {
            question: question.clone(),
        })
    }

    /// Remove the question named by a pending delete.
    ///
    /// The file is reloaded first; if the question has gone in the meantime
    /// this is `NotFound` and nothing is written.
    pub fn confirm_delete(&self, pending: PendingDelete) -> Result<ActionOutcome<Question>> {
        let id = pending.id();
        let mut questions = self.store.load();
        let removed = questions.remove(id).ok_or(BankError::NotFound { id })?;
        tracing::info!(id, "Deleting question");
        let sync = self.persist(&questions, "Delete", id)?;
        Ok(ActionOutcome {
            value: removed,
            sync,
        })
    }

    fn persist(&self, questions: &QuestionCollection, action: &str, id: u64) -> Result<SyncStatus> {
        self.store.save(questions).map_err(|e| {
            tracing::warn!(error = %e, "Save failed");
            BankError::Storage(e)
        })?;

        let Some(backend) = &self.sync else {
            return Ok(SyncStatus::Skipped);
        };
        let message = commit_message(action, id);
        Ok(backend.sync(&message).into())
    }
}

fn commit_message(action: &str, id: u64) -> String {
    format!("{action} question {id} - {}", Utc::now().to_rfc3339())
}

use qbank_model::ModelError;
use qbank_persistence::PersistenceError;
use thiserror::Error;

/// Errors returned by [`crate::QuestionBank`] operations.
///
/// None of these is fatal: the shell reports the message and carries on.
/// Sync problems are not errors at all; they ride on the action outcome.
#[derive(Debug, Error)]
pub enum BankError {
    /// Input rejected before anything changed.
    #[error("{0}")]
    Validation(ModelError),

    #[error("question {id} not found")]
    NotFound { id: u64 },

    /// The save did not happen; the file on disk is unchanged.
    #[error("questions were not saved")]
    Storage(#[from] PersistenceError),
}

impl From<ModelError> for BankError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NotFound { id } => BankError::NotFound { id },
            other => BankError::Validation(other),
        }
    }
}

impl BankError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ModelError::EmptyText) => {
                "Please enter the question text before saving.".to_string()
            }
            Self::Validation(other) => other.to_string(),
            Self::NotFound { id } => format!("There is no question with id {id}."),
            Self::Storage(err) => format!("The question was not saved. {}", err.user_message()),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Validation(ModelError::IdSpaceExhausted) => {
                Some("Renumber the questions in the data file starting from 1.".into())
            }
            Self::Validation(_) => None,
            Self::NotFound { .. } => Some("List the questions to see the current ids.".into()),
            Self::Storage(err) => err
                .suggestion()
                .map(|hint| format!("{hint} Then try again."))
                .or_else(|| Some("Try again.".into())),
        }
    }
}

pub type Result<T> = std::result::Result<T, BankError>;

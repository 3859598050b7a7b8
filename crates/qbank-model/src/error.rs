use thiserror::Error;

/// Errors raised while validating or mutating questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Question text was empty or whitespace only.
    #[error("question text must not be empty")]
    EmptyText,

    /// No question with the given id exists in the collection.
    #[error("question {id} not found")]
    NotFound { id: u64 },

    /// The highest stored id is `u64::MAX`, so no larger one exists.
    #[error("no question ids left after {}", u64::MAX)]
    IdSpaceExhausted,

    /// Two questions share an id.
    #[error("duplicate question id {id}")]
    DuplicateId { id: u64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;

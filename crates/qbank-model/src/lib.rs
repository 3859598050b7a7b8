//! Data model for the question bank.
//!
//! A [`Question`] is the only entity. Questions live in a
//! [`QuestionCollection`], which keeps insertion order and owns id
//! assignment. Image payloads are carried as base64 text ([`EncodedImage`])
//! because the backing file is JSON.

pub mod collection;
pub mod error;
pub mod image;
pub mod question;

pub use collection::{IdReassignment, QuestionCollection};
pub use error::{ModelError, Result};
pub use image::EncodedImage;
pub use question::{Question, QuestionDraft, QuestionEdit};

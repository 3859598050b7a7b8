//! The question record and its create/edit inputs.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::image::EncodedImage;

/// A single question record.
///
/// Field order here is the field order in the backing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: u64,
    text: String,
    #[serde(rename = "image_b64", default)]
    image: Option<EncodedImage>,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    topic: String,
    created_at: String,
}

impl Question {
    /// Build a record from a validated draft.
    pub(crate) fn from_draft(id: u64, draft: QuestionDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: draft.text,
            image: draft.image.as_deref().map(EncodedImage::from_bytes),
            subject: draft.subject,
            topic: draft.topic,
            created_at: created_at.to_rfc3339(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The creation timestamp exactly as stored.
    pub fn created_at_raw(&self) -> &str {
        &self.created_at
    }

    /// Parse the creation timestamp.
    ///
    /// Accepts RFC 3339 as well as offset-less ISO-8601 timestamps, which
    /// older data files contain. Returns `None` when neither parses.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.naive_local())
            .or_else(|_| NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }

    pub(crate) fn reassign_id(&mut self, id: u64) {
        self.id = id;
    }

    /// Apply an edit in place. `id` and `created_at` never change.
    ///
    /// The edit is validated first; on error the record is untouched.
    pub(crate) fn apply(&mut self, edit: QuestionEdit) -> Result<()> {
        if let Some(text) = &edit.text {
            validate_text(text)?;
        }
        if let Some(text) = edit.text {
            self.text = text;
        }
        if let Some(subject) = edit.subject {
            self.subject = subject;
        }
        if let Some(topic) = edit.topic {
            self.topic = topic;
        }
        if let Some(bytes) = edit.image {
            self.image = Some(EncodedImage::from_bytes(&bytes));
        }
        Ok(())
    }
}

/// Input for a new question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub subject: String,
    pub topic: String,
    pub image: Option<Vec<u8>>,
}

impl QuestionDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, bytes: Vec<u8>) -> Self {
        self.image = Some(bytes);
        self
    }

    /// Reject drafts whose text is empty or whitespace only.
    pub fn validate(&self) -> Result<()> {
        validate_text(&self.text)
    }
}

/// Changes to an existing question. `None` leaves a field as it is.
///
/// There is no way to clear an image: `image: None` keeps the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionEdit {
    pub text: Option<String>,
    pub subject: Option<String>,
    pub topic: Option<String>,
    pub image: Option<Vec<u8>>,
}

impl QuestionEdit {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.subject.is_none() && self.topic.is_none() && self.image.is_none()
    }
}

fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ModelError::EmptyText);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 29, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_draft_rejects_blank_text() {
        assert_eq!(QuestionDraft::new("").validate(), Err(ModelError::EmptyText));
        assert_eq!(QuestionDraft::new("  \n\t").validate(), Err(ModelError::EmptyText));
        assert!(QuestionDraft::new("What is 2 + 2?").validate().is_ok());
    }

    #[test]
    fn test_field_order_in_json() {
        let question = Question::from_draft(
            7,
            QuestionDraft::new("Define velocity.")
                .with_subject("Physics")
                .with_topic("Kinematics"),
            fixed_time(),
        );
        let json = serde_json::to_string(&question).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"text":"Define velocity.","image_b64":null,"subject":"Physics","topic":"Kinematics","created_at":"2024-03-29T10:30:00+00:00"}"#
        );
    }

    #[test]
    fn test_parses_legacy_timestamp() {
        let json = r#"{"id":1,"text":"Q","image_b64":null,"subject":"","topic":"","created_at":"2024-05-01T09:15:42.123456"}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        let parsed = question.created_at().unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2024-05-01 09:15");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id":3,"text":"Q","created_at":"2024-05-01T09:15:42"}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.subject(), "");
        assert_eq!(question.topic(), "");
        assert!(!question.has_image());
    }

    #[test]
    fn test_apply_keeps_image_when_none_supplied() {
        let mut question = Question::from_draft(
            1,
            QuestionDraft::new("Old").with_image(vec![1, 2, 3]),
            fixed_time(),
        );
        question
            .apply(QuestionEdit {
                text: Some("New".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(question.text(), "New");
        assert_eq!(question.image().unwrap().decode().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_apply_replaces_image_when_supplied() {
        let mut question =
            Question::from_draft(1, QuestionDraft::new("Q").with_image(vec![1]), fixed_time());
        question
            .apply(QuestionEdit {
                image: Some(vec![9, 9]),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(question.image().unwrap().decode().unwrap(), vec![9, 9]);
    }

    #[test]
    fn test_apply_rejects_blank_text_without_mutation() {
        let mut question = Question::from_draft(
            1,
            QuestionDraft::new("Keep me").with_subject("Maths"),
            fixed_time(),
        );
        let before = question.clone();
        let result = question.apply(QuestionEdit {
            text: Some("   ".to_string()),
            subject: Some("Physics".to_string()),
            ..Default::default()
        });
        assert_eq!(result, Err(ModelError::EmptyText));
        assert_eq!(question, before);
    }
}

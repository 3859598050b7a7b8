//! Filtering questions by text, subject and topic.
//!
//! Everything here is pure and cheap enough to rerun on every refresh, so
//! nothing is cached.

use std::collections::BTreeSet;

use qbank_model::{Question, QuestionCollection};
use serde::{Deserialize, Serialize};

/// Choice meaning "do not filter on this field".
pub const ALL: &str = "All";

/// Criteria for selecting questions. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFilter {
    /// Case-insensitive substring of the question text.
    pub search_text: Option<String>,
    /// Exact subject, or [`ALL`].
    pub subject: Option<String>,
    /// Exact topic, or [`ALL`].
    pub topic: Option<String>,
}

impl QuestionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// True when no criterion would exclude anything.
    pub fn is_unrestricted(&self) -> bool {
        self.search_text.as_deref().is_none_or(str::is_empty)
            && choice(self.subject.as_deref()).is_none()
            && choice(self.topic.as_deref()).is_none()
    }

    pub fn matches(&self, question: &Question) -> bool {
        if let Some(needle) = self.search_text.as_deref().filter(|s| !s.is_empty()) {
            if !question
                .text()
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(subject) = choice(self.subject.as_deref()) {
            if question.subject() != subject {
                return false;
            }
        }
        if let Some(topic) = choice(self.topic.as_deref()) {
            if question.topic() != topic {
                return false;
            }
        }
        true
    }

    /// Matching questions in collection order.
    pub fn apply<'a>(&self, questions: &'a QuestionCollection) -> Vec<&'a Question> {
        questions.iter().filter(|q| self.matches(q)).collect()
    }
}

/// `None` for an absent criterion or the [`ALL`] sentinel.
fn choice(value: Option<&str>) -> Option<&str> {
    value.filter(|v| *v != ALL)
}

/// Sorted, distinct, non-empty subjects.
pub fn available_subjects(questions: &QuestionCollection) -> Vec<String> {
    distinct_values(questions, Question::subject)
}

/// Sorted, distinct, non-empty topics.
pub fn available_topics(questions: &QuestionCollection) -> Vec<String> {
    distinct_values(questions, Question::topic)
}

/// Prepend the [`ALL`] choice to a list of filter values.
pub fn with_all_choice(values: Vec<String>) -> Vec<String> {
    let mut choices = Vec::with_capacity(values.len() + 1);
    choices.push(ALL.to_string());
    choices.extend(values);
    choices
}

fn distinct_values(questions: &QuestionCollection, field: fn(&Question) -> &str) -> Vec<String> {
    questions
        .iter()
        .map(field)
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

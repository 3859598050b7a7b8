//! Ordered question collection.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::question::{Question, QuestionDraft, QuestionEdit};

/// All questions in insertion order.
///
/// This is the unit of persistence: the whole collection is written on every
/// save. Ids are unique; new ids are `max(id) + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionCollection {
    questions: Vec<Question>,
}

/// A duplicate id that was replaced while repairing a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdReassignment {
    pub position: usize,
    pub old_id: u64,
    pub new_id: u64,
}

impl QuestionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, rejecting duplicate ids.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(ModelError::DuplicateId { id: question.id() });
            }
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: u64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    /// Id for the next inserted question: `1` when empty, else `max + 1`.
    ///
    /// Never derived from the length, which would hand out a live id again
    /// after a deletion.
    pub fn next_id(&self) -> Result<u64> {
        match self.questions.iter().map(Question::id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(ModelError::IdSpaceExhausted),
        }
    }

    /// Validate a draft and append it with a freshly assigned id.
    pub fn insert(&mut self, draft: QuestionDraft, created_at: DateTime<Utc>) -> Result<&Question> {
        draft.validate()?;
        let id = self.next_id()?;
        self.questions.push(Question::from_draft(id, draft, created_at));
        Ok(&self.questions[self.questions.len() - 1])
    }

    /// Apply an edit to the question with `id`.
    pub fn update(&mut self, id: u64, edit: QuestionEdit) -> Result<&Question> {
        let position = self.position(id).ok_or(ModelError::NotFound { id })?;
        self.questions[position].apply(edit)?;
        Ok(&self.questions[position])
    }

    /// Remove the question with `id`; later questions keep their ids.
    pub fn remove(&mut self, id: u64) -> Option<Question> {
        let position = self.position(id)?;
        Some(self.questions.remove(position))
    }

    /// Give every repeated id after its first occurrence a fresh id.
    ///
    /// Files written by older builds may contain duplicates from
    /// length-based id assignment.
    pub fn repair_duplicate_ids(&mut self) -> Vec<IdReassignment> {
        let mut seen = HashSet::with_capacity(self.questions.len());
        let mut duplicates = Vec::new();
        for (position, question) in self.questions.iter().enumerate() {
            if !seen.insert(question.id()) {
                duplicates.push(position);
            }
        }

        let mut reassigned = Vec::with_capacity(duplicates.len());
        for position in duplicates {
            let new_id = self
                .next_id()
                .unwrap_or_else(|_| self.lowest_unused_id());
            let question = &mut self.questions[position];
            reassigned.push(IdReassignment {
                position,
                old_id: question.id(),
                new_id,
            });
            question.reassign_id(new_id);
        }
        reassigned
    }

    /// Smallest positive id not in use. Only needed once `max + 1` overflows,
    /// and then a gap always exists.
    fn lowest_unused_id(&self) -> u64 {
        let used: HashSet<u64> = self.questions.iter().map(Question::id).collect();
        (1u64..).find(|id| !used.contains(id)).unwrap_or_default()
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }
}

impl<'a> IntoIterator for &'a QuestionCollection {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

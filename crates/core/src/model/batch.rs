use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::{Question, QuestionDraft, QuestionError};

/// Number of questions in every generated batch.
pub const BATCH_SIZE: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BatchError {
    #[error("batch must contain exactly {expected} questions, got {actual}")]
    WrongSize { expected: usize, actual: usize },

    #[error("batch repeats question id {0}")]
    DuplicateQuestion(QuestionId),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// The ordered, immutable set of questions for one quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    questions: Vec<Question>,
}

impl Batch {
    /// Validate generator output into a batch.
    ///
    /// Nothing is repaired: one bad record rejects the whole batch.
    ///
    /// # Errors
    ///
    /// Returns `BatchError` when the count is not `BATCH_SIZE`, a question id
    /// repeats, or any question fails validation.
    pub fn from_drafts(drafts: Vec<QuestionDraft>) -> Result<Self, BatchError> {
        if drafts.len() != BATCH_SIZE {
            return Err(BatchError::WrongSize {
                expected: BATCH_SIZE,
                actual: drafts.len(),
            });
        }

        let mut seen = HashSet::with_capacity(drafts.len());
        let mut questions = Vec::with_capacity(drafts.len());
        for draft in drafts {
            if !seen.insert(draft.id) {
                return Err(BatchError::DuplicateQuestion(draft.id));
            }
            questions.push(draft.validate()?);
        }

        Ok(Self { questions })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

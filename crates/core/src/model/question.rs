use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has empty prompt text")]
    EmptyText { id: QuestionId },

    #[error("question {id} has no options")]
    NoOptions { id: QuestionId },

    #[error("question {id} has an option with empty text")]
    EmptyOptionText { id: QuestionId },

    #[error("question {id} repeats option {option}")]
    DuplicateOption { id: QuestionId, option: OptionId },

    #[error("question {id} names correct option {option} which is not among its options")]
    UnknownCorrectOption { id: QuestionId, option: OptionId },
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// A single answer choice as received from the content provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOptionDraft {
    pub id: OptionId,
    pub text: String,
}

/// Unvalidated question record, shaped like the generator's JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<AnswerOptionDraft>,
    pub correct_option_id: OptionId,
    pub explanation: String,
}

impl QuestionDraft {
    /// Check the record's invariants and produce an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank, the option list is empty
    /// or repeats a label, or the correct option is not one of the options.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = self.id;
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText { id });
        }
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions { id });
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        let mut options = Vec::with_capacity(self.options.len());
        for option in self.options {
            if option.text.trim().is_empty() {
                return Err(QuestionError::EmptyOptionText { id });
            }
            if !seen.insert(option.id.clone()) {
                return Err(QuestionError::DuplicateOption {
                    id,
                    option: option.id,
                });
            }
            options.push(AnswerOption {
                id: option.id,
                text: option.text.trim().to_string(),
            });
        }

        if !seen.contains(&self.correct_option_id) {
            return Err(QuestionError::UnknownCorrectOption {
                id,
                option: self.correct_option_id,
            });
        }

        Ok(Question {
            id,
            text: self.text.trim().to_string(),
            options,
            correct_option_id: self.correct_option_id,
            explanation: self.explanation.trim().to_string(),
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    id: OptionId,
    text: String,
}

impl AnswerOption {
    #[must_use]
    pub fn id(&self) -> &OptionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A validated multiple-choice question.
///
/// `correct_option_id` is guaranteed to name exactly one of `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<AnswerOption>,
    correct_option_id: OptionId,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Prompt text, possibly containing LaTeX markup.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_option_id(&self) -> &OptionId {
        &self.correct_option_id
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn option(&self, id: &OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.id == *id)
    }

    #[must_use]
    pub fn is_correct(&self, id: &OptionId) -> bool {
        self.correct_option_id == *id
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

use std::collections::BTreeMap;

use quiz_core::model::{Difficulty, OptionId, QuestionId};

/// Score and position within the current quiz, useful for UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionProgress {
    pub score: u32,
    pub current_index: usize,
    /// Questions that received at least one selection.
    pub answered_count: usize,
    /// Latest selection per question.
    pub answers: BTreeMap<QuestionId, OptionId>,
    pub level: Option<Difficulty>,
}

impl SessionProgress {
    #[must_use]
    pub fn new(level: Difficulty) -> Self {
        Self {
            level: Some(level),
            ..Self::default()
        }
    }
}

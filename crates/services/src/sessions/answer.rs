use quiz_core::model::{OptionId, Question};

/// Result of a selection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    /// The question was already answered; nothing changed.
    Ignored,
}

/// How an option button should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Correct,
    Wrong,
}

/// The single control offered once the question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAnswerAction {
    Retry,
    Next,
    Finish,
}

impl PostAnswerAction {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Retry => "Retry",
            Self::Next => "Next",
            Self::Finish => "Finish",
        }
    }
}

/// Per-question answer state.
///
/// Cleared when the session moves to another question. `retry` clears the
/// selection but keeps the attempt history, so a question scores at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerState {
    selected: Option<OptionId>,
    answered: bool,
    correct: bool,
    attempts: u32,
    scored: bool,
}

impl AnswerState {
    #[must_use]
    pub fn selected(&self) -> Option<&OptionId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.answered && self.correct
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn can_retry(&self) -> bool {
        self.answered && !self.correct
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.answered && self.correct
    }

    /// Whether the explanation panel is visible.
    #[must_use]
    pub fn reveals_explanation(&self) -> bool {
        self.answered
    }

    pub(crate) fn select(&mut self, option: OptionId, question: &Question) -> AnswerOutcome {
        if self.answered {
            return AnswerOutcome::Ignored;
        }
        let correct = question.is_correct(&option);
        self.selected = Some(option);
        self.answered = true;
        self.correct = correct;
        self.attempts += 1;
        if correct {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        }
    }

    /// Returns true exactly once per question, the first time it is answered correctly.
    pub(crate) fn award(&mut self) -> bool {
        if self.scored || !self.is_correct() {
            return false;
        }
        self.scored = true;
        true
    }

    pub(crate) fn retry(&mut self) -> bool {
        if !self.can_retry() {
            return false;
        }
        self.selected = None;
        self.answered = false;
        self.correct = false;
        true
    }

    /// Rendering policy: nothing is revealed before an answer; afterwards the
    /// correct option is always marked and a wrong selection is marked wrong.
    #[must_use]
    pub fn mark(&self, option: &OptionId, correct_option: &OptionId) -> OptionMark {
        if !self.answered {
            return OptionMark::Neutral;
        }
        if option == correct_option {
            return OptionMark::Correct;
        }
        if self.selected.as_ref() == Some(option) {
            return OptionMark::Wrong;
        }
        OptionMark::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerOptionDraft, QuestionDraft, QuestionId};

    fn id(raw: &str) -> OptionId {
        OptionId::parse(raw).unwrap()
    }

    fn question() -> Question {
        QuestionDraft {
            id: QuestionId::new(1),
            text: "$\\int \\sin x\\,dx$".into(),
            options: ["A", "B", "C"]
                .into_iter()
                .map(|label| AnswerOptionDraft {
                    id: id(label),
                    text: format!("option {label}"),
                })
                .collect(),
            correct_option_id: id("B"),
            explanation: "$-\\cos x + C$".into(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn first_selection_locks_the_question() {
        let q = question();
        let mut state = AnswerState::default();
        assert_eq!(state.select(id("A"), &q), AnswerOutcome::Incorrect);
        assert_eq!(state.select(id("B"), &q), AnswerOutcome::Ignored);
        assert_eq!(state.selected(), Some(&id("A")));
        assert_eq!(state.attempts(), 1);
    }

    #[test]
    fn nothing_is_revealed_before_answering() {
        let state = AnswerState::default();
        for label in ["A", "B", "C"] {
            assert_eq!(state.mark(&id(label), &id("B")), OptionMark::Neutral);
        }
        assert!(!state.reveals_explanation());
    }

    #[test]
    fn wrong_answer_marks_both_options() {
        let q = question();
        let mut state = AnswerState::default();
        state.select(id("C"), &q);
        assert_eq!(state.mark(&id("B"), &id("B")), OptionMark::Correct);
        assert_eq!(state.mark(&id("C"), &id("B")), OptionMark::Wrong);
        assert_eq!(state.mark(&id("A"), &id("B")), OptionMark::Neutral);
        assert!(state.reveals_explanation());
        assert!(state.can_retry());
        assert!(!state.can_advance());
    }

    #[test]
    fn correct_answer_marks_only_the_correct_option() {
        let q = question();
        let mut state = AnswerState::default();
        state.select(id("B"), &q);
        assert_eq!(state.mark(&id("B"), &id("B")), OptionMark::Correct);
        assert_eq!(state.mark(&id("A"), &id("B")), OptionMark::Neutral);
        assert!(state.can_advance());
        assert!(!state.can_retry());
    }

    #[test]
    fn retry_reopens_only_after_a_wrong_answer() {
        let q = question();
        let mut state = AnswerState::default();
        assert!(!state.retry());

        state.select(id("A"), &q);
        assert!(state.retry());
        assert!(!state.is_answered());
        assert_eq!(state.selected(), None);

        state.select(id("B"), &q);
        assert!(!state.retry());
        assert_eq!(state.attempts(), 2);
    }

    #[test]
    fn award_happens_once() {
        let q = question();
        let mut state = AnswerState::default();
        state.select(id("A"), &q);
        assert!(!state.award());
        state.retry();
        state.select(id("B"), &q);
        assert!(state.award());
        assert!(!state.award());
    }
}

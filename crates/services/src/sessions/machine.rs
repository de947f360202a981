use std::fmt;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use quiz_core::Clock;
use quiz_core::model::{Batch, Difficulty, OptionId, Question, QuizSummary};

use super::answer::{AnswerOutcome, AnswerState, OptionMark, PostAnswerAction};
use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizPhase {
    Idle,
    Loading,
    Active,
    Finished,
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Active => "active",
            Self::Finished => "finished",
        };
        f.write_str(name)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// The quiz session state machine.
///
/// `Idle -> Loading -> Active -> Finished -> Idle`. Loading can fall back to
/// `Idle` on a failed batch. The question index only moves forward, one step at
/// a time, after the current question has been answered correctly.
pub struct QuizSession {
    clock: Clock,
    phase: QuizPhase,
    batch: Option<Batch>,
    progress: SessionProgress,
    answer: AnswerState,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    question_shown_at: Option<DateTime<Utc>>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Clock::default_clock())
    }
}

impl QuizSession {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            phase: QuizPhase::Idle,
            batch: None,
            progress: SessionProgress::default(),
            answer: AnswerState::default(),
            started_at: None,
            completed_at: None,
            question_shown_at: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn progress(&self) -> &SessionProgress {
        &self.progress
    }

    #[must_use]
    pub fn level(&self) -> Option<Difficulty> {
        self.progress.level
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.progress.score
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.progress.current_index
    }

    /// Number of questions in the batch, 0 before one has arrived.
    #[must_use]
    pub fn total(&self) -> usize {
        self.batch.as_ref().map_or(0, Batch::len)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != QuizPhase::Active {
            return None;
        }
        self.batch
            .as_ref()
            .and_then(|batch| batch.get(self.progress.current_index))
    }

    #[must_use]
    pub fn answer(&self) -> &AnswerState {
        &self.answer
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.progress.current_index + 1 >= self.total()
    }

    /// Rendering mark for an option of the current question.
    #[must_use]
    pub fn option_mark(&self, option: &OptionId) -> OptionMark {
        self.current_question()
            .map_or(OptionMark::Neutral, |question| {
                self.answer.mark(option, question.correct_option_id())
            })
    }

    /// Control offered after answering, if any.
    #[must_use]
    pub fn post_answer_action(&self) -> Option<PostAnswerAction> {
        if self.phase != QuizPhase::Active || !self.answer.is_answered() {
            return None;
        }
        if self.answer.can_retry() {
            return Some(PostAnswerAction::Retry);
        }
        if self.is_last_question() {
            Some(PostAnswerAction::Finish)
        } else {
            Some(PostAnswerAction::Next)
        }
    }

    /// "Question n/total" for the header, 1-based.
    #[must_use]
    pub fn position_label(&self) -> String {
        format!("Question {}/{}", self.progress.current_index + 1, self.total())
    }

    /// Share of the batch reached, counting the current question.
    #[must_use]
    pub fn progress_fraction(&self) -> f32 {
        match self.phase {
            QuizPhase::Finished => 1.0,
            QuizPhase::Active if self.total() > 0 => {
                #[allow(clippy::cast_precision_loss)]
                let fraction = (self.progress.current_index + 1) as f32 / self.total() as f32;
                fraction
            }
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Time spent on the current question so far.
    #[must_use]
    pub fn question_elapsed(&self) -> Duration {
        self.question_shown_at
            .map_or_else(Duration::zero, |shown| self.clock.now() - shown)
    }

    /// Wall time from the first question to finishing.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        Some(self.completed_at? - self.started_at?)
    }

    /// Final score report; only available once finished.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        if self.phase != QuizPhase::Finished {
            return None;
        }
        let total = u32::try_from(self.total()).unwrap_or(u32::MAX);
        Some(QuizSummary::new(self.progress.score, total))
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// `Idle -> Loading`. Also accepted while already loading: the new level
    /// replaces the old one and whichever batch arrives next is used.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` when active or finished.
    pub fn start(&mut self, level: Difficulty) -> Result<(), SessionError> {
        self.expect_phase(&[QuizPhase::Idle, QuizPhase::Loading], "start a quiz")?;
        self.reset();
        self.progress = SessionProgress::new(level);
        self.transition(QuizPhase::Loading);
        Ok(())
    }

    /// `Loading -> Active`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless loading.
    pub fn batch_ready(&mut self, batch: Batch) -> Result<(), SessionError> {
        self.expect_phase(&[QuizPhase::Loading], "accept a batch")?;
        let now = self.clock.now();
        self.batch = Some(batch);
        self.progress.current_index = 0;
        self.answer = AnswerState::default();
        self.started_at = Some(now);
        self.question_shown_at = Some(now);
        self.transition(QuizPhase::Active);
        Ok(())
    }

    /// `Loading -> Idle`, discarding everything.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless loading.
    pub fn batch_failed(&mut self) -> Result<(), SessionError> {
        self.expect_phase(&[QuizPhase::Loading], "fail a batch")?;
        self.reset();
        self.transition(QuizPhase::Idle);
        Ok(())
    }

    /// Answer the current question. A no-op once it is answered.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless active, and
    /// `SessionError::UnknownOption` for an id the question does not offer.
    pub fn select_option(&mut self, option: &OptionId) -> Result<AnswerOutcome, SessionError> {
        self.expect_phase(&[QuizPhase::Active], "answer")?;
        let Some(question) = self
            .batch
            .as_ref()
            .and_then(|batch| batch.get(self.progress.current_index))
        else {
            return Err(self.invalid("answer"));
        };
        if self.answer.is_answered() {
            return Ok(AnswerOutcome::Ignored);
        }
        if question.option(option).is_none() {
            return Err(SessionError::UnknownOption(option.clone()));
        }

        let question_id = question.id();
        let first_attempt = self.answer.attempts() == 0;
        let outcome = self.answer.select(option.clone(), question);

        self.progress.answers.insert(question_id, option.clone());
        if first_attempt {
            self.progress.answered_count += 1;
        }
        if self.answer.award() {
            self.progress.score += 1;
        }
        debug!(
            question = %question_id,
            ?outcome,
            score = self.progress.score,
            "answer submitted"
        );
        Ok(outcome)
    }

    /// Reopen the current question after a wrong answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless active with a wrong answer.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        self.expect_phase(&[QuizPhase::Active], "retry")?;
        if !self.answer.retry() {
            return Err(self.invalid("retry"));
        }
        Ok(())
    }

    /// Move to the next question, or finish after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless active with a correct answer.
    pub fn advance(&mut self) -> Result<QuizPhase, SessionError> {
        self.expect_phase(&[QuizPhase::Active], "advance")?;
        if !self.answer.can_advance() {
            return Err(self.invalid("advance"));
        }

        let now = self.clock.now();
        if self.is_last_question() {
            self.completed_at = Some(now);
            self.question_shown_at = None;
            self.transition(QuizPhase::Finished);
        } else {
            self.progress.current_index += 1;
            self.answer = AnswerState::default();
            self.question_shown_at = Some(now);
        }
        Ok(self.phase)
    }

    /// `Finished -> Idle`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless finished.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.expect_phase(&[QuizPhase::Finished], "restart")?;
        self.reset();
        self.transition(QuizPhase::Idle);
        Ok(())
    }

    fn reset(&mut self) {
        self.batch = None;
        self.progress = SessionProgress::default();
        self.answer = AnswerState::default();
        self.started_at = None;
        self.completed_at = None;
        self.question_shown_at = None;
    }

    fn transition(&mut self, next: QuizPhase) {
        debug!(from = %self.phase, to = %next, "quiz transition");
        self.phase = next;
    }

    fn expect_phase(
        &self,
        allowed: &[QuizPhase],
        action: &'static str,
    ) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            phase: self.phase,
            action,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("level", &self.progress.level)
            .field("batch_len", &self.total())
            .field("current_index", &self.progress.current_index)
            .field("score", &self.progress.score)
            .field("answer", &self.answer)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

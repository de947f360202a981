use quiz_core::model::{Difficulty, OptionId};
use quiz_core::time::format_elapsed;
use services::{OptionMark, PostAnswerAction, QuizSession};

/// User intents on the quiz screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start(Difficulty),
    Select(OptionId),
    Retry,
    Advance,
    Replay,
    Restart,
}

impl QuizIntent {
    /// The intent behind the post-answer button.
    #[must_use]
    pub fn from_action(action: PostAnswerAction) -> Self {
        match action {
            PostAnswerAction::Retry => Self::Retry,
            PostAnswerAction::Next | PostAnswerAction::Finish => Self::Advance,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartChoiceVm {
    pub level: Difficulty,
    pub label: &'static str,
    pub tagline: &'static str,
    pub class: &'static str,
}

#[must_use]
pub fn start_choices() -> Vec<StartChoiceVm> {
    Difficulty::ALL
        .iter()
        .map(|&level| StartChoiceVm {
            level,
            label: level.label(),
            tagline: level.tagline(),
            class: match level {
                Difficulty::Basic => "level-choice level-choice--basic",
                Difficulty::Standard => "level-choice level-choice--standard",
                Difficulty::Advanced => "level-choice level-choice--advanced",
            },
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub id: OptionId,
    pub text: String,
    pub class: &'static str,
    pub disabled: bool,
}

#[must_use]
pub fn option_class(mark: OptionMark) -> &'static str {
    match mark {
        OptionMark::Correct => "quiz-option quiz-option--correct",
        OptionMark::Wrong => "quiz-option quiz-option--wrong",
        OptionMark::Neutral => "quiz-option",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub explanation: String,
    pub action_label: &'static str,
    pub action: PostAnswerAction,
}

/// Everything the question screen renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub level_label: &'static str,
    pub timer_label: String,
    pub score: u32,
    pub position_label: String,
    /// Width of the progress bar, `0..=100`.
    pub progress_percent: u32,
    pub text: String,
    pub options: Vec<OptionVm>,
    pub feedback: Option<FeedbackVm>,
}

impl QuestionVm {
    /// `None` unless a question is on screen.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let question = session.current_question()?;
        let answer = session.answer();

        let options = question
            .options()
            .iter()
            .map(|option| OptionVm {
                id: option.id().clone(),
                text: option.text().to_string(),
                class: option_class(session.option_mark(option.id())),
                disabled: answer.is_answered(),
            })
            .collect();

        let feedback = session.post_answer_action().map(|action| FeedbackVm {
            correct: answer.is_correct(),
            explanation: question.explanation().to_string(),
            action_label: action.label(),
            action,
        });

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let progress_percent = (session.progress_fraction() * 100.0).round() as u32;

        Some(Self {
            level_label: session.level().map_or("", |level| level.label()),
            timer_label: format_elapsed(session.question_elapsed()),
            score: session.score(),
            position_label: session.position_label(),
            progress_percent,
            text: question.text().to_string(),
            options,
            feedback,
        })
    }

    /// Option for a keyboard shortcut: `A`..`D` by label or `1`..`4` by position.
    #[must_use]
    pub fn option_for_key(&self, key: &str) -> Option<OptionId> {
        if let Ok(position) = key.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|index| self.options.get(index))
                .map(|option| option.id.clone());
        }
        self.options
            .iter()
            .find(|option| option.id.as_str().eq_ignore_ascii_case(key))
            .map(|option| option.id.clone())
    }
}

mod answer;
mod machine;
mod progress;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use answer::{AnswerOutcome, AnswerState, OptionMark, PostAnswerAction};
pub use machine::{QuizPhase, QuizSession};
pub use progress::SessionProgress;
pub use workflow::QuizLoopService;

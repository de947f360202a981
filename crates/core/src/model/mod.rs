mod batch;
mod difficulty;
mod ids;
mod question;
mod summary;

pub use batch::{BATCH_SIZE, Batch, BatchError};
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use ids::{OptionId, ParseIdError, QuestionId};
pub use question::{AnswerOption, AnswerOptionDraft, Question, QuestionDraft, QuestionError};
pub use summary::{QuizSummary, ScoreTier};

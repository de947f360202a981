#![forbid(unsafe_code)]

pub mod ai;
pub mod audio;
pub mod content;
pub mod effects;
pub mod error;
pub mod narration;
pub mod sessions;

pub use quiz_core::Clock;

pub use ai::{GeminiClient, GeminiConfig};
pub use audio::{AudioClip, AudioOutput, SilentOutput};
pub use content::{ContentProvider, GeminiContentProvider};
pub use effects::{FeedbackEffects, ParticleEffect};
pub use error::{
    AiError, EffectError, GenerationError, NarrationError, PlaybackError, SessionError,
};
pub use narration::{
    AUTO_NARRATION_DELAY, GeminiSpeechSynthesizer, NarrationOutcome, NarrationSchedule, Narrator,
    SpeechSynthesizer,
};
pub use sessions::{
    AnswerOutcome, AnswerState, OptionMark, PostAnswerAction, QuizLoopService, QuizPhase,
    QuizSession, SessionProgress,
};

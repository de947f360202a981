//! Spoken narration of questions and feedback.

mod gemini;
mod narrator;
mod pcm;
mod schedule;

use async_trait::async_trait;

use crate::audio::AudioClip;
use crate::error::NarrationError;

pub use gemini::GeminiSpeechSynthesizer;
pub use narrator::{NarrationOutcome, Narrator};
pub use pcm::{TTS_SAMPLE_RATE, decode_pcm16, decode_pcm16_base64};
pub use schedule::{AUTO_NARRATION_DELAY, NarrationSchedule, PendingNarration};

/// Phrase spoken after a correct answer.
pub const CORRECT_PHRASE: &str = "Wow, brilliant! Spot on!";
/// Phrase spoken after an incorrect answer.
pub const INCORRECT_PHRASE: &str = "So close! Take a careful look at the explanation below.";

/// Text-to-speech backend.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, NarrationError>;
}

//! Fire-and-forget feedback after an answer.

mod applause;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::audio::{AudioClip, AudioOutput};
use crate::error::EffectError;
use crate::narration::{CORRECT_PHRASE, INCORRECT_PHRASE, Narrator};
use crate::sessions::AnswerOutcome;

pub use applause::{APPLAUSE_SAMPLE_RATE, synthesize_applause};

/// Optional celebratory particle animation (confetti).
#[async_trait(?Send)]
pub trait ParticleEffect: Send + Sync {
    async fn celebrate(&self) -> Result<(), EffectError>;
}

/// Plays applause, particles and narration in response to an answer.
///
/// Every effect is best-effort: failures are logged and never returned.
#[derive(Clone)]
pub struct FeedbackEffects {
    narrator: Narrator,
    output: Arc<dyn AudioOutput>,
    particles: Option<Arc<dyn ParticleEffect>>,
    applause: Option<Arc<AudioClip>>,
}

impl FeedbackEffects {
    /// Build effects with a freshly synthesized applause clip.
    #[must_use]
    pub fn new(
        narrator: Narrator,
        output: Arc<dyn AudioOutput>,
        particles: Option<Arc<dyn ParticleEffect>>,
    ) -> Self {
        let applause = synthesize_applause(&mut rand::rng(), APPLAUSE_SAMPLE_RATE);
        Self {
            narrator,
            output,
            particles,
            applause: Some(Arc::new(applause)),
        }
    }

    /// Narration only: no applause, no particles.
    #[must_use]
    pub fn narration_only(narrator: Narrator, output: Arc<dyn AudioOutput>) -> Self {
        Self {
            narrator,
            output,
            particles: None,
            applause: None,
        }
    }

    #[must_use]
    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    pub async fn on_answer(&self, outcome: AnswerOutcome) {
        match outcome {
            AnswerOutcome::Correct => {
                tokio::join!(
                    self.play_applause(),
                    self.celebrate(),
                    self.narrator.speak(CORRECT_PHRASE),
                );
            }
            AnswerOutcome::Incorrect => {
                self.narrator.speak(INCORRECT_PHRASE).await;
            }
            AnswerOutcome::Ignored => {}
        }
    }

    async fn play_applause(&self) {
        let Some(clip) = self.applause.as_ref() else {
            return;
        };
        if let Err(err) = self.output.play(clip).await {
            warn!(error = %err, "applause playback failed");
        }
    }

    async fn celebrate(&self) {
        let Some(particles) = self.particles.as_ref() else {
            return;
        };
        if let Err(err) = particles.celebrate().await {
            debug!(error = %err, "particle effect unavailable");
        }
    }
}

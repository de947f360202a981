use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use super::SpeechSynthesizer;
use crate::audio::AudioOutput;
use crate::error::NarrationError;

/// What happened to a narration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationOutcome {
    Played,
    /// Another narration was already in flight.
    Dropped,
    /// Synthesis or playback failed; nothing (or only part) was heard.
    Failed,
    /// No synthesizer configured.
    Disabled,
}

/// Single-flight narration.
///
/// At most one request is in flight at a time. A request that arrives while one
/// is active is dropped rather than queued, and it never interrupts the clip
/// that is already playing. Failures are logged and swallowed.
#[derive(Clone)]
pub struct Narrator {
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    output: Arc<dyn AudioOutput>,
    in_flight: Arc<AtomicBool>,
}

impl Narrator {
    #[must_use]
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, output: Arc<dyn AudioOutput>) -> Self {
        Self {
            synthesizer: Some(synthesizer),
            output,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A narrator that never speaks.
    #[must_use]
    pub fn disabled(output: Arc<dyn AudioOutput>) -> Self {
        Self {
            synthesizer: None,
            output,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.synthesizer.is_some()
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Synthesize `text` and play it to completion.
    pub async fn speak(&self, text: &str) -> NarrationOutcome {
        let Some(synthesizer) = self.synthesizer.as_ref() else {
            return NarrationOutcome::Disabled;
        };
        if text.trim().is_empty() {
            return NarrationOutcome::Failed;
        }
        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!("narration already in flight, dropping request");
            return NarrationOutcome::Dropped;
        }
        let _guard = InFlightGuard(&self.in_flight);

        match self.synthesize_and_play(synthesizer.as_ref(), text).await {
            Ok(()) => NarrationOutcome::Played,
            Err(err) => {
                warn!(error = %err, "narration failed");
                NarrationOutcome::Failed
            }
        }
    }

    async fn synthesize_and_play(
        &self,
        synthesizer: &dyn SpeechSynthesizer,
        text: &str,
    ) -> Result<(), NarrationError> {
        let clip = synthesizer.synthesize(text).await?;
        if clip.is_empty() {
            return Err(NarrationError::EmptyAudio);
        }
        debug!(duration_ms = clip.duration_ms(), "playing narration");
        self.output.play(&clip).await?;
        Ok(())
    }
}

/// Clears the in-flight flag when the request ends, including when the
/// future is dropped mid-way.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

use async_trait::async_trait;

use crate::error::PlaybackError;

/// Mono PCM samples normalized to `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioClip {
    #[must_use]
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        let len = u64::try_from(self.samples.len()).unwrap_or(u64::MAX);
        len.saturating_mul(1000) / u64::from(self.sample_rate)
    }
}

/// Somewhere clips can be played.
///
/// `play` resolves once playback has finished (or failed). Implementations may
/// be tied to a UI thread, so the returned future is not required to be `Send`.
#[async_trait(?Send)]
pub trait AudioOutput: Send + Sync {
    async fn play(&self, clip: &AudioClip) -> Result<(), PlaybackError>;
}

/// Output that discards every clip, used when audio is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentOutput;

#[async_trait(?Send)]
impl AudioOutput for SilentOutput {
    async fn play(&self, _clip: &AudioClip) -> Result<(), PlaybackError> {
        Ok(())
    }
}

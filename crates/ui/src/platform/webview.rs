use async_trait::async_trait;
use services::{AudioClip, AudioOutput, EffectError, ParticleEffect, PlaybackError};

use super::scripts::{fire_confetti, play_pcm};

/// Plays clips through WebAudio in the window's WebView.
pub struct WebAudioOutput;

#[async_trait(?Send)]
impl AudioOutput for WebAudioOutput {
    async fn play(&self, clip: &AudioClip) -> Result<(), PlaybackError> {
        if clip.is_empty() {
            return Ok(());
        }
        play_pcm(clip.samples(), clip.sample_rate())
            .await
            .map_err(PlaybackError)
    }
}

/// Confetti burst via `canvas-confetti` when the page has loaded it.
pub struct WebParticles;

#[async_trait(?Send)]
impl ParticleEffect for WebParticles {
    async fn celebrate(&self) -> Result<(), EffectError> {
        fire_confetti().await.map_err(EffectError)
    }
}

use base64::Engine;

use crate::audio::AudioClip;
use crate::error::NarrationError;

/// Sample rate of the PCM returned by the speech model.
pub const TTS_SAMPLE_RATE: u32 = 24_000;

/// Convert little-endian PCM16 bytes to normalized samples.
///
/// A trailing odd byte is ignored.
#[must_use]
pub fn decode_pcm16(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|chunk| {
            let value = i16::from_le_bytes([chunk[0], chunk[1]]);
            (f32::from(value) / 32768.0).clamp(-1.0, 1.0)
        })
        .collect()
}

/// Decode a base64 PCM16 payload into a clip at `sample_rate`.
///
/// # Errors
///
/// Returns `NarrationError::Decode` for invalid base64 and
/// `NarrationError::EmptyAudio` when no whole sample is present.
pub fn decode_pcm16_base64(payload: &str, sample_rate: u32) -> Result<AudioClip, NarrationError> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
    let samples = decode_pcm16(&bytes);
    if samples.is_empty() {
        return Err(NarrationError::EmptyAudio);
    }
    Ok(AudioClip::new(samples, sample_rate))
}

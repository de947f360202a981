use async_trait::async_trait;

use super::{SpeechSynthesizer, TTS_SAMPLE_RATE, decode_pcm16_base64};
use crate::ai::GeminiClient;
use crate::ai::gemini::{GenerateRequest, GenerationConfig, SpeechConfig};
use crate::audio::AudioClip;
use crate::error::NarrationError;

/// Speaking-style instruction wrapped around every narrated text.
const VOICE_DIRECTION: &str = "Read aloud in a warm, enthusiastic and very friendly quiz-host voice";

/// Text-to-speech through a Gemini speech model with a fixed prebuilt voice.
#[derive(Clone)]
pub struct GeminiSpeechSynthesizer {
    client: GeminiClient,
}

impl GeminiSpeechSynthesizer {
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.client.enabled()
    }

    fn request(text: &str, voice: &str) -> GenerateRequest {
        GenerateRequest::prompt(
            format!("{VOICE_DIRECTION}: \"{text}\""),
            GenerationConfig {
                response_modalities: Some(vec!["AUDIO".into()]),
                speech_config: Some(SpeechConfig::prebuilt(voice)),
                ..GenerationConfig::default()
            },
        )
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, NarrationError> {
        let config = self.client.config().ok_or(NarrationError::Disabled)?;
        let request = Self::request(text, &config.voice);
        let response = self.client.generate(&config.tts_model, &request).await?;
        let inline = response
            .first_inline_data()
            .ok_or(NarrationError::EmptyAudio)?;
        let sample_rate = inline.sample_rate().unwrap_or(TTS_SAMPLE_RATE);
        decode_pcm16_base64(&inline.data, sample_rate)
    }
}

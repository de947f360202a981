use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AiError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_VOICE: &str = "Kore";

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub text_model: String,
    pub tts_model: String,
    pub voice: String,
}

impl GeminiConfig {
    /// Read the API configuration from the environment.
    ///
    /// Returns `None` when no API key is set, which disables generation and narration.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("QUIZ_AI_API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("QUIZ_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let text_model = env::var("QUIZ_AI_MODEL").unwrap_or_else(|_| DEFAULT_TEXT_MODEL.into());
        let tts_model = env::var("QUIZ_TTS_MODEL").unwrap_or_else(|_| DEFAULT_TTS_MODEL.into());
        let voice = env::var("QUIZ_TTS_VOICE").unwrap_or_else(|_| DEFAULT_VOICE.into());
        Some(Self {
            base_url,
            api_key: api_key.trim().to_string(),
            text_model,
            tts_model,
            voice,
        })
    }
}

/// Thin client for the `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: Option<GeminiConfig>,
}

impl GeminiClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GeminiConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    #[must_use]
    pub fn config(&self) -> Option<&GeminiConfig> {
        self.config.as_ref()
    }

    /// Call `models/{model}:generateContent` with the given request body.
    ///
    /// # Errors
    ///
    /// Returns `AiError` when the client is disabled, the request fails, or the
    /// status is not a success.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, AiError> {
        let config = self.config.as_ref().ok_or(AiError::Disabled)?;

        let url = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            model
        );
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &config.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AiError::HttpStatus(response.status()));
        }

        Ok(response.json().await?)
    }
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    /// A single user turn containing `prompt`.
    #[must_use]
    pub fn prompt(prompt: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.into(),
                }],
            }],
            generation_config: Some(config),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

impl SpeechConfig {
    #[must_use]
    pub fn prebuilt(voice_name: impl Into<String>) -> Self {
        Self {
            voice_config: VoiceConfig {
                prebuilt_voice_config: PrebuiltVoiceConfig {
                    voice_name: voice_name.into(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    fn first_part(&self) -> Option<&ResponsePart> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
    }

    /// Text of the first part of the first candidate.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.first_part()
            .and_then(|part| part.text.as_deref())
            .filter(|text| !text.trim().is_empty())
    }

    /// Inline payload of the first part of the first candidate.
    #[must_use]
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.first_part()
            .and_then(|part| part.inline_data.as_ref())
            .filter(|data| !data.data.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: Option<String>,
    pub data: String,
}

impl InlineData {
    /// Sample rate from a PCM mime type such as `audio/L16;codec=pcm;rate=24000`.
    #[must_use]
    pub fn sample_rate(&self) -> Option<u32> {
        self.mime_type
            .as_deref()?
            .split(';')
            .find_map(|param| param.trim().strip_prefix("rate="))
            .and_then(|rate| rate.trim().parse().ok())
            .filter(|&rate| rate > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speech_request_uses_camel_case_fields() {
        let request = GenerateRequest::prompt(
            "hello",
            GenerationConfig {
                response_modalities: Some(vec!["AUDIO".into()]),
                speech_config: Some(SpeechConfig::prebuilt("Kore")),
                ..GenerationConfig::default()
            },
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "AUDIO");
        assert_eq!(
            json["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Kore"
        );
        assert!(json["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn response_exposes_first_text_and_audio() {
        let text: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"[]"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(text.first_text(), Some("[]"));
        assert!(text.first_inline_data().is_none());

        let audio: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"audio/L16;rate=24000","data":"AAA="}}]}}]}"#,
        )
        .unwrap();
        let inline = audio.first_inline_data().unwrap();
        assert_eq!(inline.data, "AAA=");
        assert_eq!(inline.sample_rate(), Some(24_000));
    }

    #[test]
    fn sample_rate_needs_a_rate_parameter() {
        let inline = |mime: Option<&str>| InlineData {
            mime_type: mime.map(str::to_string),
            data: "AAA=".into(),
        };
        assert_eq!(inline(Some("audio/L16;codec=pcm;rate=16000")).sample_rate(), Some(16_000));
        assert_eq!(inline(Some("audio/L16")).sample_rate(), None);
        assert_eq!(inline(Some("audio/L16;rate=fast")).sample_rate(), None);
        assert_eq!(inline(None).sample_rate(), None);
    }

    #[test]
    fn empty_response_has_nothing() {
        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.first_text().is_none());
        assert!(empty.first_inline_data().is_none());
    }

    #[tokio::test]
    async fn disabled_client_refuses_requests() {
        let client = GeminiClient::new(None);
        assert!(!client.enabled());
        let request = GenerateRequest::prompt("x", GenerationConfig::default());
        let err = client.generate("m", &request).await.unwrap_err();
        assert!(matches!(err, AiError::Disabled));
    }
}

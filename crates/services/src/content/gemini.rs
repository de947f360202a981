use async_trait::async_trait;
use quiz_core::model::{Batch, Difficulty};

use super::{ContentProvider, batch_prompt, batch_response_schema, parse_batch};
use crate::ai::GeminiClient;
use crate::ai::gemini::{GenerateRequest, GenerationConfig};
use crate::error::GenerationError;

/// Generates question batches with a Gemini text model and structured JSON output.
#[derive(Clone)]
pub struct GeminiContentProvider {
    client: GeminiClient,
}

impl GeminiContentProvider {
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.client.enabled()
    }

    fn request(level: Difficulty, uniqueness_token: &str) -> GenerateRequest {
        GenerateRequest::prompt(
            batch_prompt(level, uniqueness_token),
            GenerationConfig {
                response_mime_type: Some("application/json".into()),
                response_schema: Some(batch_response_schema()),
                ..GenerationConfig::default()
            },
        )
    }
}

#[async_trait]
impl ContentProvider for GeminiContentProvider {
    async fn generate_batch(
        &self,
        level: Difficulty,
        uniqueness_token: &str,
    ) -> Result<Batch, GenerationError> {
        let config = self.client.config().ok_or(GenerationError::Disabled)?;
        let request = Self::request(level, uniqueness_token);
        let response = self.client.generate(&config.text_model, &request).await?;
        let text = response
            .first_text()
            .ok_or(GenerationError::EmptyResponse)?;
        parse_batch(text)
    }
}

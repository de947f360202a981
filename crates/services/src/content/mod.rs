//! Question generation.

mod gemini;
mod prompt;

use async_trait::async_trait;
use quiz_core::model::{Batch, Difficulty, QuestionDraft};
use rand::Rng;

use crate::error::GenerationError;

pub use gemini::GeminiContentProvider;
pub use prompt::{batch_prompt, batch_response_schema};

/// Source of question batches.
///
/// Implementations either return a fully validated batch or fail; they never
/// hand back partial output.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn generate_batch(
        &self,
        level: Difficulty,
        uniqueness_token: &str,
    ) -> Result<Batch, GenerationError>;
}

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 8;

/// Fresh random base-36 token mixed into each generation prompt.
pub fn uniqueness_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..TOKEN_LEN)
        .map(|_| char::from(TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())]))
        .collect()
}

/// Parse the generator's JSON array into a validated batch.
///
/// # Errors
///
/// Returns `GenerationError::EmptyResponse` for blank text,
/// `GenerationError::Malformed` when the JSON does not match the question shape,
/// and `GenerationError::InvalidBatch` when any batch invariant is violated.
pub fn parse_batch(raw: &str) -> Result<Batch, GenerationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    let drafts: Vec<QuestionDraft> = serde_json::from_str(raw)?;
    Ok(Batch::from_drafts(drafts)?)
}

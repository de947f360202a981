//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{BatchError, OptionId};

use crate::sessions::QuizPhase;

/// Transport-level failures talking to the generative API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AiError {
    #[error("AI service is not configured")]
    Disabled,
    #[error("AI request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by content providers while building a question batch.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("question generation is not configured")]
    Disabled,
    #[error("question generation failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(reqwest::Error),
    #[error("question generation returned an empty response")]
    EmptyResponse,
    #[error("question generation returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("question generation returned an invalid batch: {0}")]
    InvalidBatch(#[from] BatchError),
}

impl From<AiError> for GenerationError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Disabled => Self::Disabled,
            AiError::HttpStatus(status) => Self::HttpStatus(status),
            AiError::Http(err) => Self::Http(err),
        }
    }
}

/// Errors emitted while synthesizing or playing narration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NarrationError {
    #[error("narration is not configured")]
    Disabled,
    #[error("narration request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(reqwest::Error),
    #[error("narration returned no audio")]
    EmptyAudio,
    #[error("narration audio could not be decoded: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

impl From<AiError> for NarrationError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Disabled => Self::Disabled,
            AiError::HttpStatus(status) => Self::HttpStatus(status),
            AiError::Http(err) => Self::Http(err),
        }
    }
}

/// Audio output could not play a clip.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("audio playback failed: {0}")]
pub struct PlaybackError(pub String);

/// A visual feedback effect could not run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("feedback effect unavailable: {0}")]
pub struct EffectError(pub String);

/// Errors emitted by the quiz session state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {action} while the quiz is {phase}")]
    InvalidTransition {
        phase: QuizPhase,
        action: &'static str,
    },
    #[error("option {0} does not belong to the current question")]
    UnknownOption(OptionId),
}

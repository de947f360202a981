use std::sync::Arc;

use tracing::{info, warn};

use quiz_core::model::{Batch, Difficulty};

use super::machine::{QuizPhase, QuizSession};
use crate::Clock;
use crate::content::{ContentProvider, uniqueness_token};
use crate::error::{GenerationError, SessionError};

/// Orchestrates quiz start: asks the provider for a batch and feeds the
/// result into the session.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    provider: Arc<dyn ContentProvider>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            clock: Clock::default(),
            provider,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Fresh idle session sharing this service's clock.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new(self.clock)
    }

    /// Request a batch for `level` with a fresh uniqueness token.
    ///
    /// # Errors
    ///
    /// Returns whatever `GenerationError` the provider reports.
    pub async fn fetch_batch(&self, level: Difficulty) -> Result<Batch, GenerationError> {
        let token = uniqueness_token(&mut rand::rng());
        info!(%level, %token, "requesting question batch");
        self.provider.generate_batch(level, &token).await
    }

    /// Feed a fetch result into a loading session.
    ///
    /// A generation failure is logged and the session falls back to idle; it
    /// is not surfaced as an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` when the session is no
    /// longer loading.
    pub fn apply_batch(
        session: &mut QuizSession,
        result: Result<Batch, GenerationError>,
    ) -> Result<QuizPhase, SessionError> {
        match result {
            Ok(batch) => session.batch_ready(batch)?,
            Err(err) => {
                warn!(error = %err, "question generation failed");
                session.batch_failed()?;
            }
        }
        Ok(session.phase())
    }

    /// Start `session` at `level` and wait for the batch.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` when the session cannot start.
    pub async fn start(
        &self,
        session: &mut QuizSession,
        level: Difficulty,
    ) -> Result<QuizPhase, SessionError> {
        session.start(level)?;
        let result = self.fetch_batch(level).await;
        Self::apply_batch(session, result)
    }
}

//! Utterance generation step.

use std::sync::Arc;

use tracing::debug;

use crate::domain::conversation::{prompts, MessageLog, PersonaConfig, Stage};
use crate::ports::{CompletionError, CompletionModel};

/// Produces the agent's next line for plain (tool-free) turns.
pub struct UtteranceGenerator<P: ?Sized + CompletionModel> {
    model: Arc<P>,
}

impl<P: ?Sized + CompletionModel> UtteranceGenerator<P> {
    /// Creates a generator over the given model.
    pub fn new(model: Arc<P>) -> Self {
        Self { model }
    }

    /// Generates raw model text for the agent's next utterance.
    ///
    /// One model call, no retry; transient failures propagate to the
    /// controller.
    ///
    /// # Errors
    ///
    /// - [`CompletionError`] if the underlying model call fails
    pub async fn generate(
        &self,
        persona: &PersonaConfig,
        stage: &Stage,
        transcript: &MessageLog,
    ) -> Result<String, CompletionError> {
        let prompt = prompts::utterance_prompt(persona, stage, &transcript.render());
        debug!(stage = stage.id(), prompt_len = prompt.len(), "generating utterance");
        self.model.complete(&prompt).await
    }
}

//! Stage classification step.

use std::sync::Arc;

use tracing::warn;

use crate::domain::conversation::{prompts, MessageLog, Stage, StageRegistry};
use crate::ports::{CompletionError, CompletionModel};

/// Asks the model which stage the conversation should move to next.
pub struct StageClassifier<P: ?Sized + CompletionModel> {
    model: Arc<P>,
}

impl<P: ?Sized + CompletionModel> StageClassifier<P> {
    /// Creates a classifier over the given model.
    pub fn new(model: Arc<P>) -> Self {
        Self { model }
    }

    /// Returns the id of the stage the conversation should move to.
    ///
    /// An empty transcript short-circuits to the first stage without a model
    /// call — classification is meaningless with no history. A response that
    /// carries no integer token holds the current stage and logs a warning
    /// instead of failing the conversation.
    ///
    /// # Errors
    ///
    /// - [`CompletionError`] if the underlying model call fails
    pub async fn classify(
        &self,
        transcript: &MessageLog,
        current: &Stage,
        registry: &StageRegistry,
    ) -> Result<u32, CompletionError> {
        if transcript.is_empty() {
            return Ok(registry.first().id());
        }

        let prompt = prompts::stage_classification_prompt(&transcript.render(), current, registry);
        let response = self.model.complete(&prompt).await?;

        match first_integer_token(&response) {
            Some(id) => Ok(id),
            None => {
                warn!(
                    response = %response.trim(),
                    held_stage = current.id(),
                    "stage response carried no integer, holding current stage"
                );
                Ok(current.id())
            }
        }
    }
}

/// Extracts the first maximal digit run of `text` as an integer.
///
/// Returns `None` when no digits appear or the run overflows `u32` — both
/// count as classifier parse faults for the caller.
fn first_integer_token(text: &str) -> Option<u32> {
    text.split(|c: char| !c.is_ascii_digit())
        .find(|token| !token.is_empty())
        .and_then(|token| token.parse().ok())
}

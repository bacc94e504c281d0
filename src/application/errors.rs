//! Turn-level error taxonomy.

use thiserror::Error;

use crate::ports::CompletionError;

/// Errors that abort a single conversational turn.
///
/// A failed turn leaves the transcript untouched; the caller decides whether
/// to retry the whole turn or end the conversation. Classifier parse faults
/// are not represented here — they are recovered in place by holding the
/// current stage.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The model call behind generation, planning, or classification failed.
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),

    /// The model asked for a tool that is not registered. Never substituted
    /// with a default tool.
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// The planning loop hit its iteration cap without reaching a finish.
    #[error("planning did not finish within {cap} iterations")]
    IterationCapExceeded {
        /// The configured cap.
        cap: u32,
    },
}

impl TurnError {
    /// Returns true if a caller-level retry of the turn could plausibly
    /// succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            TurnError::Completion(err) => err.is_retryable(),
            TurnError::ToolNotFound(_) => false,
            TurnError::IterationCapExceeded { .. } => false,
        }
    }
}

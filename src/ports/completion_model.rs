//! Completion model port - interface for LLM provider integrations.
//!
//! This port abstracts all interactions with the underlying language model,
//! letting the conversation core generate completions without coupling to a
//! specific provider.
//!
//! # Design
//!
//! - Text-in/text-out: the core renders a full prompt string and receives
//!   raw completion text back; no structured fields cross this boundary.
//! - Providers are substituted via dependency injection (`Arc<P>`).
//! - Error types cover the common failure modes (rate limits, timeouts,
//!   provider outages), with a retryability classification for callers that
//!   wrap turns in their own retry policy. The core itself never retries.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct CannedModel;
//!
//! #[async_trait]
//! impl CompletionModel for CannedModel {
//!     async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
//!         Ok("Hello!".to_string())
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("canned", "canned-1")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for language-model completions.
///
/// Implementations connect to an external model service and translate
/// between the provider-specific API and plain prompt/completion text.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Generates a completion for a fully rendered prompt.
    ///
    /// Blocking from the caller's point of view: the conversation core
    /// awaits the result and never issues two calls for the same turn
    /// concurrently.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Returns provider information for logging.
    fn provider_info(&self) -> ProviderInfo;
}

/// Provider identification, carried in log fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "anthropic", "openai").
    pub name: String,
    /// Model identifier (e.g., "claude-sonnet-4-20250514", "gpt-3.5-turbo").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Completion errors.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl CompletionError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if a caller-level retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CompletionError::RateLimited { .. }
                | CompletionError::Unavailable { .. }
                | CompletionError::Network(_)
                | CompletionError::Timeout { .. }
        )
    }
}

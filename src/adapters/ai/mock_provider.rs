//! Mock completion model for testing.
//!
//! A configurable implementation of the [`CompletionModel`] port, letting
//! tests run without calling a real provider.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - A repeating default response once the queue is exhausted
//! - Error injection for resilience testing
//! - Prompt recording for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockProvider::new()
//!     .with_response("Hello, interested in a mattress?");
//!
//! let text = provider.complete("...").await?;
//! assert_eq!(text, "Hello, interested in a mattress?");
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{CompletionError, CompletionModel, ProviderInfo};

/// Mock completion model for testing.
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Returned once the queue is exhausted.
    default_response: String,
    /// Provider info to return.
    info: ProviderInfo,
    /// Recorded prompts for verification.
    calls: Arc<Mutex<Vec<String>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this completion text.
    Success(String),
    /// Return an error.
    Error(MockError),
}

/// Mock error kinds for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },
    /// Simulate provider unavailability.
    Unavailable {
        /// Error details.
        message: String,
    },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate a network error.
    Network {
        /// Error details.
        message: String,
    },
    /// Simulate a timeout.
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl From<MockError> for CompletionError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => {
                CompletionError::rate_limited(retry_after_secs)
            }
            MockError::Unavailable { message } => CompletionError::unavailable(message),
            MockError::AuthenticationFailed => CompletionError::AuthenticationFailed,
            MockError::Network { message } => CompletionError::network(message),
            MockError::Timeout { timeout_secs } => CompletionError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default_response: "Mock response".to_string(),
            info: ProviderInfo::new("mock", "mock-model-1"),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Queues an unavailability error.
    pub fn with_unavailable(self, message: impl Into<String>) -> Self {
        self.with_error(MockError::Unavailable {
            message: message.into(),
        })
    }

    /// Sets the response returned once the queue is exhausted. Useful for
    /// loops that call the model an unbounded number of times.
    pub fn with_default_response(mut self, content: impl Into<String>) -> Self {
        self.default_response = content.into();
        self
    }

    /// Sets the provider info.
    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    /// Returns the number of completions requested from this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns the recorded prompts, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the recorded prompts.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success(self.default_response.clone()))
    }
}

#[async_trait]
impl CompletionModel for MockProvider {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(prompt.to_string());

        match self.next_response() {
            MockResponse::Success(content) => Ok(content),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

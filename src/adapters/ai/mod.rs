//! AI adapters - concrete implementations of the completion model port.

mod anthropic_provider;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use mock_provider::{MockError, MockProvider, MockResponse};
pub use openai_provider::{OpenAiConfig, OpenAiProvider};

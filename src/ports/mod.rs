//! Ports layer - capability interfaces implemented by adapters.

mod completion_model;

pub use completion_model::{CompletionError, CompletionModel, ProviderInfo};

//! Domain-level error types for the conversation module.

use thiserror::Error;

/// A stage registry cannot be built without at least one stage; stage 1 is
/// the fallback target for every unknown lookup and must always exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stage catalog requires at least one stage")]
pub struct EmptyStageCatalog;

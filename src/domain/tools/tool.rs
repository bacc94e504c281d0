//! Tool capability boundary.

/// A named capability the planning loop can hand work to.
///
/// Tools are supplied externally (typically built from the product catalog)
/// and the core treats them as an opaque capability set keyed by name.
/// Invocation is synchronous; the observation string is fed back into the
/// next planning prompt verbatim.
pub trait Tool: Send + Sync {
    /// The exact, case-sensitive name the model must reference.
    fn name(&self) -> &str;

    /// One-line description rendered into the planning prompt.
    fn description(&self) -> &str;

    /// Runs the tool against model-provided input, returning the observation.
    fn invoke(&self, input: &str) -> String;
}

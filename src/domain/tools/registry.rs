//! Tool registry - the capability set available to one agent.

use std::sync::Arc;

use super::tool::Tool;

/// The set of tools a tool-using agent may invoke.
///
/// Lookup is by exact, case-sensitive name; an unknown name is a
/// tool-resolution fault for the caller to surface, never a silent
/// substitution. Registration order is preserved because it is the order
/// tools are listed in the planning prompt.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool. If two tools share a name the earlier registration
    /// wins lookups; callers are expected to keep names unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Builder-style registration.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Looks up a tool by exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    /// Returns the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Renders `"name: description"` lines for the planning prompt.
    pub fn describe_lines(&self) -> String {
        self.tools
            .iter()
            .map(|tool| format!("{}: {}", tool.name(), tool.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the comma-separated list of tool names.
    pub fn names(&self) -> String {
        self.tools
            .iter()
            .map(|tool| tool.name().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Repeats its input back."
        }

        fn invoke(&self, input: &str) -> String {
            input.to_string()
        }
    }

    struct UpperTool;

    impl Tool for UpperTool {
        fn name(&self) -> &str {
            "upper"
        }

        fn description(&self) -> &str {
            "Uppercases its input."
        }

        fn invoke(&self, input: &str) -> String {
            input.to_uppercase()
        }
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let registry = ToolRegistry::new().with_tool(Arc::new(EchoTool));

        assert!(registry.get("echo").is_some());
        assert!(registry.get("Echo").is_none());
        assert!(registry.get("ech").is_none());
    }

    #[test]
    fn invoke_through_registry() {
        let registry = ToolRegistry::new().with_tool(Arc::new(UpperTool));
        let tool = registry.get("upper").unwrap();
        assert_eq!(tool.invoke("quiet"), "QUIET");
    }

    #[test]
    fn describe_lines_lists_registration_order() {
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(EchoTool))
            .with_tool(Arc::new(UpperTool));

        assert_eq!(
            registry.describe_lines(),
            "echo: Repeats its input back.\nupper: Uppercases its input."
        );
        assert_eq!(registry.names(), "echo, upper");
    }

    #[test]
    fn empty_registry_reports_empty() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.describe_lines(), "");
    }
}

//! Product search tool backed by the catalog.

use std::sync::Arc;

use crate::domain::tools::Tool;

use super::file_catalog::FileCatalog;

/// Upper bound on matches returned per invocation, to keep observations
/// small enough to feed back into the planning prompt.
const MAX_MATCHES: usize = 3;

/// Keyword search over the product catalog, exposed to the planning loop.
pub struct ProductSearchTool {
    catalog: Arc<FileCatalog>,
}

impl ProductSearchTool {
    /// Creates the tool over a loaded catalog.
    pub fn new(catalog: Arc<FileCatalog>) -> Self {
        Self { catalog }
    }
}

impl Tool for ProductSearchTool {
    fn name(&self) -> &str {
        "product_search"
    }

    fn description(&self) -> &str {
        "Searches the product catalog and returns matching product \
         descriptions. Input should be a product name or keywords."
    }

    fn invoke(&self, input: &str) -> String {
        let matches = self.catalog.search(input);
        if matches.is_empty() {
            return "No matching products found.".to_string();
        }

        matches
            .iter()
            .take(MAX_MATCHES)
            .map(|entry| format!("{}: {}", entry.name, entry.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn catalog() -> Arc<FileCatalog> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"Cloud Nine\nA plush king-size mattress with cooling gel foam.\n\n\
              Firm Foundation\nAn extra-firm queen mattress for back sleepers.\n",
        )
        .unwrap();
        Arc::new(FileCatalog::load(file.path()).unwrap())
    }

    #[test]
    fn returns_matching_descriptions() {
        let tool = ProductSearchTool::new(catalog());
        let observation = tool.invoke("plush cooling");

        assert!(observation.starts_with("Cloud Nine:"));
        assert!(observation.contains("cooling gel foam"));
    }

    #[test]
    fn reports_when_nothing_matches() {
        let tool = ProductSearchTool::new(catalog());
        assert_eq!(tool.invoke("trampoline"), "No matching products found.");
    }

    #[test]
    fn name_matches_the_planning_protocol() {
        let tool = ProductSearchTool::new(catalog());
        assert_eq!(tool.name(), "product_search");
        assert!(!tool.description().is_empty());
    }
}

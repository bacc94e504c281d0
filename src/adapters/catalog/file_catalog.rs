//! Product catalog adapter.
//!
//! Loads the catalog file into name→description entries. The file is plain
//! text: blank-line-separated blocks, each starting with the product name on
//! its own line followed by the description. The conversation core never
//! sees this format; it only receives tools built over the loaded entries.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// One product from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Product name (the block's first line).
    pub name: String,
    /// Product description (the rest of the block).
    pub description: String,
}

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog at {}: {source}", .path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog file held no entries.
    #[error("catalog at {} contains no entries", .path.display())]
    Empty {
        /// The path that was loaded.
        path: PathBuf,
    },
}

/// In-memory product catalog loaded from a file.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    entries: Vec<CatalogEntry>,
}

impl FileCatalog {
    /// Loads and parses the catalog file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Io`] if the file cannot be read
    /// - [`CatalogError::Empty`] if it parses to zero entries
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let entries = parse_entries(&text);
        if entries.is_empty() {
            return Err(CatalogError::Empty {
                path: path.to_path_buf(),
            });
        }

        Ok(Self { entries })
    }

    /// Returns the catalog entries in file order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Name→description lookup (case-insensitive exact name match).
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(|entry| entry.description.as_str())
    }

    /// Returns the entries whose name or description mention any word of
    /// `query`, best matches first.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let words: Vec<String> = query
            .split_whitespace()
            .map(|word| word.to_lowercase())
            .collect();
        if words.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &CatalogEntry)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let haystack = format!("{}\n{}", entry.name, entry.description).to_lowercase();
                let score = words.iter().filter(|word| haystack.contains(*word)).count();
                (score > 0).then_some((score, entry))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, entry)| entry).collect()
    }
}

/// Splits the raw catalog text into blank-line-separated entries.
fn parse_entries(text: &str) -> Vec<CatalogEntry> {
    text.split("\n\n")
        .filter_map(|block| {
            let block = block.trim();
            let (name, description) = block.split_once('\n')?;
            let name = name.trim();
            let description = description.trim();
            (!name.is_empty() && !description.is_empty()).then(|| CatalogEntry {
                name: name.to_string(),
                description: description.to_string(),
            })
        })
        .collect()
}

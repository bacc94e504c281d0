//! Conversation stages for the scripted sales flow.
//!
//! A stage describes what kind of dialogue the agent should engage in at a
//! given point of the call. Stages do not enforce an ordering; the classifier
//! picks the next stage from the full catalog on every user turn.

use serde::{Deserialize, Serialize};

use super::errors::EmptyStageCatalog;

/// A discrete named phase of the scripted conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    id: u32,
    name: String,
    description: String,
}

impl Stage {
    /// Returns the stage id (contiguous, starting at 1).
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the short stage name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the directive describing how the agent behaves in this stage.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Immutable catalog of conversation stages.
///
/// Built once at process start and passed into the controller; never mutated
/// afterwards. Ids are assigned contiguously from 1 at construction, so the
/// contiguity invariant cannot be violated by callers.
///
/// # Invariants
///
/// - At least one stage exists; stage 1 is the canonical default.
/// - `lookup` is total: unknown ids resolve to stage 1.
#[derive(Debug, Clone)]
pub struct StageRegistry {
    stages: Vec<Stage>,
}

impl StageRegistry {
    /// Creates a registry from `(name, description)` pairs, assigning ids
    /// contiguously from 1 in iteration order.
    ///
    /// # Errors
    ///
    /// - [`EmptyStageCatalog`] if no entries are given
    pub fn new<N, D>(entries: impl IntoIterator<Item = (N, D)>) -> Result<Self, EmptyStageCatalog>
    where
        N: Into<String>,
        D: Into<String>,
    {
        let stages: Vec<Stage> = entries
            .into_iter()
            .zip(1u32..)
            .map(|((name, description), id)| Stage {
                id,
                name: name.into(),
                description: description.into(),
            })
            .collect();

        if stages.is_empty() {
            return Err(EmptyStageCatalog);
        }

        Ok(Self { stages })
    }

    /// Returns the stage for `id`, falling back to stage 1 for unknown ids.
    ///
    /// This is a total function with no error path.
    pub fn lookup(&self, id: u32) -> &Stage {
        id.checked_sub(1)
            .and_then(|index| self.stages.get(index as usize))
            .unwrap_or(&self.stages[0])
    }

    /// Returns the default stage (stage 1).
    pub fn first(&self) -> &Stage {
        &self.stages[0]
    }

    /// Returns the number of stages in the catalog.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false; kept for `len`/`is_empty` symmetry.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Iterates the stages in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter()
    }
}

impl Default for StageRegistry {
    /// The seven-stage sales catalog used by the stock agent.
    fn default() -> Self {
        Self::new([
            (
                "Introduction",
                "Open the conversation. Introduce yourself and your company, \
                 stay polite and professional, and make the reason for the \
                 contact clear.",
            ),
            (
                "Qualification",
                "Confirm you are speaking with the right person and that they \
                 have the authority to make purchasing decisions.",
            ),
            (
                "Value Proposition",
                "Explain briefly how your product can benefit the prospect \
                 and what sets it apart from competitors.",
            ),
            (
                "Needs Analysis",
                "Ask open-ended questions to uncover the prospect's needs and \
                 pain points. Listen carefully to their answers.",
            ),
            (
                "Solution Presentation",
                "Present your product as the solution to the needs the \
                 prospect has described.",
            ),
            (
                "Objection Handling",
                "Address any concerns the prospect raises. Be prepared to \
                 back your claims with evidence.",
            ),
            (
                "Close",
                "Propose a concrete next step: a demo, a trial, or a meeting \
                 with decision makers. Summarize what was discussed.",
            ),
        ])
        .expect("default stage catalog is non-empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn assigns_contiguous_ids_from_one() {
            let registry = StageRegistry::new([("a", "first"), ("b", "second")]).unwrap();
            let ids: Vec<u32> = registry.iter().map(Stage::id).collect();
            assert_eq!(ids, vec![1, 2]);
        }

        #[test]
        fn rejects_empty_catalog() {
            let entries: Vec<(&str, &str)> = Vec::new();
            assert!(StageRegistry::new(entries).is_err());
        }

        #[test]
        fn default_catalog_has_seven_stages() {
            let registry = StageRegistry::default();
            assert_eq!(registry.len(), 7);
            assert_eq!(registry.first().name(), "Introduction");
            assert_eq!(registry.lookup(7).name(), "Close");
        }
    }

    mod lookup {
        use super::*;

        #[test]
        fn known_id_returns_its_stage() {
            let registry = StageRegistry::default();
            assert_eq!(registry.lookup(3).name(), "Value Proposition");
        }

        #[test]
        fn unknown_ids_fall_back_to_stage_one() {
            let registry = StageRegistry::default();
            for unknown in [0, 8, 42, u32::MAX] {
                assert_eq!(registry.lookup(unknown), registry.lookup(1));
            }
        }

        #[test]
        fn first_is_stage_one() {
            let registry = StageRegistry::default();
            assert_eq!(registry.first(), registry.lookup(1));
        }
    }
}

//! Agent configuration

use serde::Deserialize;

use crate::application::DEFAULT_MAX_PLAN_STEPS;
use crate::domain::conversation::PersonaConfig;

use super::error::ValidationError;

/// Agent configuration: the persona plus conversation-control knobs
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Persona presented to the prospect
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Stage the conversation starts in
    #[serde(default = "default_initial_stage")]
    pub initial_stage: u32,

    /// Plan/invoke loop cap for tool-using turns
    #[serde(default = "default_max_tool_steps")]
    pub max_tool_steps: u32,
}

impl AgentConfig {
    /// Validate agent configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.initial_stage == 0 {
            return Err(ValidationError::InvalidInitialStage);
        }

        if self.max_tool_steps == 0 {
            return Err(ValidationError::InvalidMaxToolSteps);
        }

        if self.persona.tools_enabled && self.persona.catalog_reference.is_none() {
            return Err(ValidationError::CatalogRequired);
        }

        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            persona: PersonaConfig::default(),
            initial_stage: default_initial_stage(),
            max_tool_steps: default_max_tool_steps(),
        }
    }
}

fn default_initial_stage() -> u32 {
    1
}

fn default_max_tool_steps() -> u32 {
    DEFAULT_MAX_PLAN_STEPS
}

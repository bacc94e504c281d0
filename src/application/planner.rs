//! Bounded plan/invoke loop for tool-using turns.
//!
//! One turn of a tool-using agent is a small state machine: plan against the
//! model, parse the response, and either finish with an utterance or invoke
//! a tool and feed the observation back into the next plan. A hard iteration
//! cap bounds the loop; exceeding it fails the turn, never the process.

use std::sync::Arc;

use tracing::debug;

use crate::domain::conversation::{parse_action, prompts, MessageLog, ParsedAction, PersonaConfig, Stage};
use crate::domain::tools::ToolRegistry;
use crate::ports::CompletionModel;

use super::errors::TurnError;

/// Default cap on plan/invoke cycles per turn.
pub const DEFAULT_MAX_PLAN_STEPS: u32 = 15;

/// Runs the plan/invoke loop for one turn.
pub struct ToolPlanner<P: ?Sized + CompletionModel> {
    model: Arc<P>,
    tools: ToolRegistry,
    max_steps: u32,
}

impl<P: ?Sized + CompletionModel> ToolPlanner<P> {
    /// Creates a planner with the default iteration cap.
    pub fn new(model: Arc<P>, tools: ToolRegistry) -> Self {
        Self {
            model,
            tools,
            max_steps: DEFAULT_MAX_PLAN_STEPS,
        }
    }

    /// Overrides the plan/invoke iteration cap.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Returns the configured iteration cap.
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Runs plan/invoke cycles until the model produces a finish, returning
    /// the turn's raw utterance text.
    ///
    /// # Errors
    ///
    /// - [`TurnError::Completion`] if a model call fails
    /// - [`TurnError::ToolNotFound`] if the model names an unregistered tool
    /// - [`TurnError::IterationCapExceeded`] after `max_steps` cycles without
    ///   a finish
    pub async fn run_turn(
        &self,
        persona: &PersonaConfig,
        stage: &Stage,
        transcript: &MessageLog,
    ) -> Result<String, TurnError> {
        let history = transcript.render();
        let mut scratchpad = Scratchpad::default();

        for step in 0..self.max_steps {
            let prompt =
                prompts::planner_prompt(persona, stage, &history, &self.tools, &scratchpad.render());
            let response = self.model.complete(&prompt).await?;

            match parse_action(&response, &persona.agent_name) {
                ParsedAction::Finish { output } => {
                    debug!(step, "planning finished");
                    return Ok(output);
                }
                ParsedAction::Invoke {
                    tool_name,
                    tool_input,
                } => {
                    let tool = self
                        .tools
                        .get(&tool_name)
                        .ok_or_else(|| TurnError::ToolNotFound(tool_name.clone()))?;
                    let observation = tool.invoke(&tool_input);
                    debug!(
                        step,
                        tool = %tool_name,
                        observation_len = observation.len(),
                        "tool invoked"
                    );
                    scratchpad.push(tool_name, tool_input, observation);
                }
            }
        }

        Err(TurnError::IterationCapExceeded {
            cap: self.max_steps,
        })
    }
}

/// Accumulated invoke→observation pairs within one turn, rendered back into
/// every subsequent planning prompt.
#[derive(Debug, Default)]
struct Scratchpad {
    entries: Vec<ScratchpadEntry>,
}

#[derive(Debug)]
struct ScratchpadEntry {
    tool: String,
    input: String,
    observation: String,
}

impl Scratchpad {
    fn push(&mut self, tool: String, input: String, observation: String) {
        self.entries.push(ScratchpadEntry {
            tool,
            input,
            observation,
        });
    }

    fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "Action: {}\nAction Input: {}\nObservation: {}",
                    entry.tool, entry.input, entry.observation
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Prompt rendering for classification, generation, and planning.
//!
//! Templates are filled from the persona, the stage catalog, and the rendered
//! transcript. The literal wording here is an output the core produces for
//! the model boundary; callers never parse these strings back.

use crate::domain::tools::ToolRegistry;

use super::persona::PersonaConfig;
use super::stage::{Stage, StageRegistry};

/// Renders the stage-classification prompt.
///
/// Embeds the full transcript and the enumerated stage catalog, and asks for
/// a bare stage number in return.
pub fn stage_classification_prompt(
    transcript: &str,
    current: &Stage,
    registry: &StageRegistry,
) -> String {
    let catalog = registry
        .iter()
        .map(|stage| format!("{}. {}: {}", stage.id(), stage.name(), stage.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a sales assistant helping your agent decide which stage of a \
         sales conversation the agent should move to next.\n\
         Following '===' is the conversation history.\n\
         Use this history to make your decision. Do not take anything else \
         into account.\n\
         ===\n\
         {transcript}\n\
         ===\n\n\
         Select the next immediate conversation stage from the following \
         options:\n\
         {catalog}\n\n\
         The current stage is {current_id} ({current_name}).\n\
         Answer with a single number only, no words.",
        transcript = transcript,
        catalog = catalog,
        current_id = current.id(),
        current_name = current.name(),
    )
}

/// Renders the persona preamble shared by generation and planning prompts.
fn persona_preamble(persona: &PersonaConfig) -> String {
    format!(
        "Never forget your name is {agent_name}. You work as a {agent_role} \
         at {company_name}.\n\
         {company_name}'s business is the following: {company_business}\n\
         Company values are the following: {company_values}\n\
         You are contacting a potential customer in order to \
         {conversation_purpose}\n\
         Your means of contacting the prospect is {conversation_type}.\n\n\
         Keep your responses short to retain the prospect's attention. Always \
         think about which conversation stage you are at before answering, \
         and respond according to that stage only.",
        agent_name = persona.agent_name,
        agent_role = persona.agent_role,
        company_name = persona.company_name,
        company_business = persona.company_business,
        company_values = persona.company_values,
        conversation_purpose = persona.conversation_purpose,
        conversation_type = persona.conversation_type,
    )
}

/// Renders the plain utterance-generation prompt (tool use disabled).
///
/// Ends with the agent-name cue so the model continues the transcript in the
/// agent's voice.
pub fn utterance_prompt(persona: &PersonaConfig, stage: &Stage, transcript: &str) -> String {
    format!(
        "{preamble}\n\n\
         Current conversation stage: {stage_description}\n\n\
         Conversation history:\n\
         {transcript}\n\
         {agent_name}:",
        preamble = persona_preamble(persona),
        stage_description = stage.description(),
        transcript = transcript,
        agent_name = persona.agent_name,
    )
}

/// Renders the planning prompt for tool-using turns.
///
/// Adds the rendered tool list, the Action/Action Input protocol, and the
/// scratchpad of prior invocations to the base persona prompt.
pub fn planner_prompt(
    persona: &PersonaConfig,
    stage: &Stage,
    transcript: &str,
    tools: &ToolRegistry,
    scratchpad: &str,
) -> String {
    format!(
        "{preamble}\n\n\
         TOOLS:\n\
         ------\n\
         {agent_name} has access to the following tools:\n\n\
         {tool_lines}\n\n\
         To use a tool, use exactly this format:\n\n\
         Action: the tool to use, one of [{tool_names}]\n\
         Action Input: the input to the tool\n\
         Observation: the result of the tool\n\n\
         When you have a final response to say to the prospect, or if a tool \
         is not needed, you MUST use the format:\n\n\
         {agent_name}: your response here\n\n\
         Begin!\n\n\
         Current conversation stage: {stage_description}\n\n\
         Conversation history:\n\
         {transcript}\n\n\
         {scratchpad}",
        preamble = persona_preamble(persona),
        agent_name = persona.agent_name,
        tool_lines = tools.describe_lines(),
        tool_names = tools.names(),
        stage_description = stage.description(),
        transcript = transcript,
        scratchpad = scratchpad,
    )
}

//! Sales persona supplied at controller construction.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The identity and mission the agent projects during a conversation.
///
/// Supplied once at controller construction and read-only thereafter. The
/// defaults mirror the stock mattress-sales persona so the binary works out
/// of the box; deployments override the fields through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Display name of the agent; also the transcript label and the finish
    /// marker the output parser looks for.
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// Job title presented to the prospect.
    #[serde(default = "default_agent_role")]
    pub agent_role: String,

    /// Company the agent represents.
    #[serde(default = "default_company_name")]
    pub company_name: String,

    /// One-paragraph description of what the company does.
    #[serde(default = "default_company_business")]
    pub company_business: String,

    /// The company's mission statement.
    #[serde(default = "default_company_values")]
    pub company_values: String,

    /// Why the agent is contacting this prospect.
    #[serde(default = "default_conversation_purpose")]
    pub conversation_purpose: String,

    /// The contact medium, e.g. "call" or "chat".
    #[serde(default = "default_conversation_type")]
    pub conversation_type: String,

    /// Whether turns run through the tool-planning loop.
    #[serde(default)]
    pub tools_enabled: bool,

    /// Path to the product catalog file tools are built from.
    #[serde(default)]
    pub catalog_reference: Option<PathBuf>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            agent_role: default_agent_role(),
            company_name: default_company_name(),
            company_business: default_company_business(),
            company_values: default_company_values(),
            conversation_purpose: default_conversation_purpose(),
            conversation_type: default_conversation_type(),
            tools_enabled: false,
            catalog_reference: None,
        }
    }
}

fn default_agent_name() -> String {
    "Ted Lasso".to_string()
}

fn default_agent_role() -> String {
    "Business Development Representative".to_string()
}

fn default_company_name() -> String {
    "Sleep Haven".to_string()
}

fn default_company_business() -> String {
    "Sleep Haven is a premium mattress company that provides customers with \
     the most comfortable and supportive sleeping experience possible."
        .to_string()
}

fn default_company_values() -> String {
    "Our mission at Sleep Haven is to help people achieve a better night's \
     sleep by providing exceptional mattresses at an affordable price."
        .to_string()
}

fn default_conversation_purpose() -> String {
    "find out whether they are looking to achieve better sleep via buying a \
     premier mattress."
        .to_string()
}

fn default_conversation_type() -> String {
    "call".to_string()
}

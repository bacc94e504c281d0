//! Transcript messages and speaker tagging.
//!
//! Messages are immutable records of what was said during a conversation.
//! User text is stored verbatim; agent text carries its speaker label inline
//! (exactly one leading `"<agent name>: "` prefix), because that is the form
//! in which the transcript is fed back to the model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The sales agent.
    Agent,
    /// The human prospect.
    User,
}

/// A single entry of the conversation transcript.
///
/// # Invariants
///
/// - User text is stored verbatim, with no speaker label.
/// - Agent text carries exactly one leading `"<agent name>: "` label,
///   guaranteed by [`normalize_agent_text`] before construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    speaker: Speaker,
    text: String,
    sent_at: DateTime<Utc>,
}

impl Message {
    /// Creates a user message from verbatim input.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    /// Creates an agent message from already-normalized text.
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Agent,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    /// Returns the speaker.
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// Returns the stored text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the message was recorded.
    pub fn sent_at(&self) -> &DateTime<Utc> {
        &self.sent_at
    }

    /// Returns true if this message was authored by the agent.
    pub fn is_agent(&self) -> bool {
        self.speaker == Speaker::Agent
    }

    /// Returns true if this message was authored by the user.
    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }

    /// Renders the `"speaker: text"` line fed back to the model.
    ///
    /// Agent text already carries its label, so it is returned as-is; user
    /// text gets the fixed `User` label.
    pub fn as_line(&self) -> String {
        match self.speaker {
            Speaker::Agent => self.text.clone(),
            Speaker::User => format!("User: {}", self.text),
        }
    }
}

/// Normalizes raw model output into labeled agent text.
///
/// Strips any repeated leading `"<agent name>: "` markers the model echoed,
/// then prepends exactly one. Idempotent: applying it twice yields the same
/// result as applying it once.
pub fn normalize_agent_text(raw: &str, agent_name: &str) -> String {
    let marker = format!("{agent_name}: ");
    let mut body = raw.trim();
    while let Some(rest) = body.strip_prefix(marker.as_str()) {
        body = rest.trim_start();
    }
    format!("{marker}{body}")
}

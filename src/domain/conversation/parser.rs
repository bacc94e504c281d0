//! Output parsing for raw model text.
//!
//! The planning loop speaks a plain-text protocol: a response is either the
//! agent's final utterance (marked with the agent's own `"<name>:"` prefix)
//! or a tool request written as an `Action:` / `Action Input:` block. This
//! parser decides which, and never fails — malformed output degrades to a
//! finish carrying the raw text verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

/// A parsed model response: either the turn's final utterance or a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAction {
    /// The user-facing reply; terminates the planning loop for this turn.
    Finish {
        /// The utterance text, trimmed, without the finish marker.
        output: String,
    },
    /// A tool request; continues the planning loop.
    Invoke {
        /// Name of the tool to call, trimmed.
        tool_name: String,
        /// Input for the tool, trimmed and unquoted.
        tool_input: String,
    },
}

/// Tool name runs to the end of its line; input runs greedily to the end of
/// the text. Only the first block in a response is honored.
static ACTION_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Action: (.*?)\n*Action Input: ((?s:.*))").expect("action pattern is valid")
});

/// Parses raw model output into a [`ParsedAction`].
///
/// Rules, in priority order:
///
/// 1. Text containing the literal `"<ai_prefix>:"` marker is a `Finish`;
///    the output is everything after the *last* occurrence, so repeated
///    mentions of the prefix inside reasoning text do not truncate the
///    real answer.
/// 2. Otherwise an `Action:` / `Action Input:` block is an `Invoke`, with a
///    single pair of enclosing double-quotes stripped from the input.
/// 3. Anything else is a `Finish` carrying the whole text.
///
/// Pure and total: no side effects, and no input can make it panic.
pub fn parse_action(text: &str, ai_prefix: &str) -> ParsedAction {
    let marker = format!("{ai_prefix}:");
    if let Some(idx) = text.rfind(&marker) {
        return ParsedAction::Finish {
            output: text[idx + marker.len()..].trim().to_string(),
        };
    }

    if let Some(caps) = ACTION_BLOCK.captures(text) {
        return ParsedAction::Invoke {
            tool_name: caps[1].trim().to_string(),
            tool_input: strip_enclosing_quotes(caps[2].trim()).to_string(),
        };
    }

    ParsedAction::Finish {
        output: text.to_string(),
    }
}

/// Removes one pair of enclosing double-quotes, if present.
fn strip_enclosing_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

//! Append-only conversation transcript.

use super::message::Message;

/// Ordered log of every message exchanged in a conversation.
///
/// Insertion order is significant: it is the literal conversational order fed
/// back to the model on every call. The core only ever appends; it never
/// reorders or truncates.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the end of the transcript.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drops all messages. Used when a conversation is re-seeded.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Returns the messages in conversational order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing has been said yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Renders the transcript as newline-joined `"speaker: text"` lines,
    /// the form every prompt template embeds.
    pub fn render(&self) -> String {
        self.messages
            .iter()
            .map(Message::as_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

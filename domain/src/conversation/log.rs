//! Append-only conversation log

use super::message::{Message, ParticipantId};
use serde::Serialize;

/// Source attributed to the seed message that starts every run.
pub const SEED_SOURCE: &str = "user";

/// Ordered, append-only record of a workflow's turns
///
/// Messages are never reordered, removed, or mutated once appended.
/// Readers (selectors, termination conditions, participants) only ever get
/// a shared borrow, so they always observe a complete prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return it with its assigned sequence number.
    pub fn append(
        &mut self,
        source: impl Into<ParticipantId>,
        content: impl Into<String>,
    ) -> &Message {
        let sequence = self.messages.len();
        self.messages.push(Message {
            source: source.into(),
            content: content.into(),
            sequence,
        });
        &self.messages[sequence]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn first(&self) -> Option<&Message> {
        self.messages.first()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Whether any message in the log was produced by `participant`.
    pub fn contains_source(&self, participant: &str) -> bool {
        self.messages.iter().any(|m| m.source == participant)
    }

    /// Messages appended after `participant`'s latest turn.
    ///
    /// The whole log if `participant` has not spoken yet.
    pub fn since_last_from(&self, participant: &str) -> &[Message] {
        let start = self
            .messages
            .iter()
            .rposition(|m| m.source == participant)
            .map_or(0, |i| i + 1);
        &self.messages[start..]
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

//! Termination conditions evaluated against the newest message

use crate::conversation::message::Message;
use serde::{Deserialize, Serialize};

/// Predicate deciding whether a run ends after a message is appended
///
/// When a condition fires the runner stops unconditionally, even if the
/// selector would pick another participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationCondition {
    /// Case-sensitive substring match on the message content.
    TextMention(String),
    /// Fires once the log holds at least this many messages, seed included.
    MaxMessages(usize),
    /// Fires if any member fires.
    Any(Vec<TerminationCondition>),
}

impl TerminationCondition {
    pub fn text_mention(token: impl Into<String>) -> Self {
        Self::TextMention(token.into())
    }

    /// Combine with another condition; the result fires if either does.
    pub fn or(self, other: TerminationCondition) -> Self {
        match self {
            Self::Any(mut conditions) => {
                conditions.push(other);
                Self::Any(conditions)
            }
            condition => Self::Any(vec![condition, other]),
        }
    }

    pub fn is_terminal(&self, message: &Message) -> bool {
        match self {
            Self::TextMention(token) => !token.is_empty() && message.content.contains(token),
            Self::MaxMessages(limit) => message.sequence + 1 >= *limit,
            Self::Any(conditions) => conditions.iter().any(|c| c.is_terminal(message)),
        }
    }
}

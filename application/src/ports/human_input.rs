//! Human input port for gate participants.
//!
//! A human gate suspends the workflow until a line of text is available.
//! The text is used verbatim as the gate's message; approval is decided
//! later by the selector's decision policy, not here.
//!
//! # Architecture
//!
//! Following the Ports and Adapters pattern:
//! - **Port**: [`HumanInputPort`] - defined here in application layer
//! - **Adapter**: `InteractiveHumanInput` - implemented in presentation layer
//!
//! # Built-in Implementations
//!
//! - [`ScriptedHumanInput`] - replays a fixed queue of replies, then reports EOF
//! - [`FixedReplyInput`] - always answers with the same text

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use thiserror::Error;
use turnstile_domain::{Message, ParticipantId};

/// Error type for human input operations.
///
/// These are failures to obtain input, not decisions made by the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HumanInputError {
    /// Input stream closed before a line was available.
    #[error("End of input")]
    Eof,
    /// User cancelled the operation (e.g., via Ctrl+C).
    #[error("Operation cancelled")]
    Cancelled,
    /// Input/output error (e.g., terminal read failure).
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Context shown to the human before they answer
#[derive(Debug, Clone, Copy)]
pub struct HumanPrompt<'a> {
    /// Gate participant asking for input
    pub participant: &'a ParticipantId,
    /// Human-readable description of the gate's role
    pub description: &'a str,
    /// Conversation so far
    pub messages: &'a [Message],
}

impl HumanPrompt<'_> {
    /// The message under review, if any.
    pub fn latest(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Port for reading a line of human input.
#[async_trait]
pub trait HumanInputPort: Send + Sync {
    /// Block until the human provides a line of text.
    async fn read_line(&self, prompt: &HumanPrompt<'_>) -> Result<String, HumanInputError>;
}

/// Replays a queue of replies in order.
///
/// Once the queue is empty every call fails with [`HumanInputError::Eof`],
/// which makes it suitable for tests and unattended runs.
pub struct ScriptedHumanInput {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedHumanInput {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|q| q.len()).unwrap_or(0)
    }
}

#[async_trait]
impl HumanInputPort for ScriptedHumanInput {
    async fn read_line(&self, _prompt: &HumanPrompt<'_>) -> Result<String, HumanInputError> {
        let mut replies = self
            .replies
            .lock()
            .map_err(|e| HumanInputError::IoError(e.to_string()))?;
        replies.pop_front().ok_or(HumanInputError::Eof)
    }
}

/// Always answers with the same reply.
pub struct FixedReplyInput {
    reply: String,
}

impl FixedReplyInput {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl HumanInputPort for FixedReplyInput {
    async fn read_line(&self, _prompt: &HumanPrompt<'_>) -> Result<String, HumanInputError> {
        Ok(self.reply.clone())
    }
}

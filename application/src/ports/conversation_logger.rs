//! Conversation transcript port
//!
//! Every workflow, nested ones included, reports the same four events to a
//! [`ConversationLogger`]. Adapters turn them into a machine-readable
//! transcript (one JSON object per line in the infrastructure layer).
//!
//! `tracing` stays the channel for diagnostics; this port carries the
//! conversation itself.

use serde_json::Value;

/// What happened in a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationEventKind {
    RunStarted,
    MessageAppended,
    RunCompleted,
    RunFailed,
}

impl ConversationEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationEventKind::RunStarted => "run_started",
            ConversationEventKind::MessageAppended => "message_appended",
            ConversationEventKind::RunCompleted => "run_completed",
            ConversationEventKind::RunFailed => "run_failed",
        }
    }
}

/// One transcript event; the payload always names `workflow` and `depth`.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    pub kind: ConversationEventKind,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: ConversationEventKind, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// Sink for transcript events.
///
/// `log` cannot fail: a broken transcript must never change how a run ends,
/// so adapters swallow their own I/O errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

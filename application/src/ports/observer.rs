//! Conversation observer port
//!
//! Defines the interface for rendering a run as it happens. Observers only
//! watch: nothing they do feeds back into routing.

use crate::participants::ParticipantKind;
use crate::use_cases::run_workflow::{RunOutcome, WorkflowError};
use turnstile_domain::{Message, ParticipantId};

/// Callbacks for each step of a workflow run
///
/// `depth` is 0 for the outermost workflow and grows by one per level of
/// nesting. Implementations live in the presentation layer.
pub trait ConversationObserver: Send + Sync {
    /// Called when a workflow appends its seed message
    fn on_run_start(&self, _workflow: &str, _depth: usize) {}

    /// Called right before a participant is asked to act
    fn on_turn_start(
        &self,
        _workflow: &str,
        _depth: usize,
        _participant: &ParticipantId,
        _kind: ParticipantKind,
    ) {
    }

    /// Called after every append, seed included
    fn on_message(&self, workflow: &str, depth: usize, message: &Message);

    /// Called when a workflow stops normally
    fn on_run_complete(&self, _workflow: &str, _depth: usize, _outcome: &RunOutcome) {}

    /// Called when a workflow aborts with an error
    fn on_run_failed(&self, _workflow: &str, _depth: usize, _error: &WorkflowError) {}
}

/// No-op observer for when rendering is not needed
pub struct NoObserver;

impl ConversationObserver for NoObserver {
    fn on_message(&self, _workflow: &str, _depth: usize, _message: &Message) {}
}

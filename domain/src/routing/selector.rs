//! Turn selector trait

use crate::conversation::message::{Message, ParticipantId};
use std::fmt;

/// Decides which participant speaks next
///
/// Implementations must be pure: the result depends only on `messages`
/// (a complete prefix of the conversation log) and on configuration fixed
/// at construction. Returning `None` ends the workflow.
pub trait TurnSelector: Send + Sync + fmt::Debug {
    /// Pick the next speaker for the given log prefix.
    fn select(&self, messages: &[Message]) -> Option<ParticipantId>;

    /// Every participant this selector can ever return.
    ///
    /// Used at workflow construction to check that each routable role is
    /// registered, so an unknown name can never surface mid-run.
    fn roles(&self) -> Vec<ParticipantId>;
}

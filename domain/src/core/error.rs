//! Domain error types

use thiserror::Error;

/// Domain-level errors.
///
/// Every variant is a configuration error: the workflow is structurally
/// unsound and cannot be run. None of them are recoverable at run time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Duplicate participant name: {0}")]
    DuplicateParticipant(String),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Workflow '{workflow}' routes to '{role}', which is not a registered participant")]
    UnregisteredRole { workflow: String, role: String },

    #[error("Workflow '{0}' has no productive roles")]
    EmptyRoleSequence(String),

    #[error("Workflow '{0}' retries roles and requires allow_repeated_speaker = true")]
    RepeatedSpeakerRequired(String),

    #[error("Invalid workflow configuration: {0}")]
    InvalidConfig(String),
}

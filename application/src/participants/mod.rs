//! Workflow participants
//!
//! Every participant exposes the same capability, [`Participant::act`],
//! so the runner does not care whether a turn is one model call, one line
//! of human input, or an entire nested workflow run.
//!
//! | Variant | Suspends on | Errors |
//! |---------|-------------|--------|
//! | [`llm_agent::LlmAgent`] | inference request | [`ParticipantError::Inference`] |
//! | [`human_proxy::HumanProxy`] | a line of input | [`ParticipantError::Input`] |
//! | [`nested::NestedWorkflow`] | the whole inner run | [`ParticipantError::NestedRun`] |

pub mod human_proxy;
pub mod llm_agent;
pub mod nested;
pub mod registry;

use crate::ports::human_input::HumanInputError;
use crate::ports::llm_gateway::GatewayError;
use crate::use_cases::run_workflow::{RunHooks, WorkflowError};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use turnstile_domain::{ConversationLog, ParticipantId};

/// Which variant a participant is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantKind {
    LanguageModel,
    Human,
    NestedWorkflow,
}

impl ParticipantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantKind::LanguageModel => "language_model",
            ParticipantKind::Human => "human",
            ParticipantKind::NestedWorkflow => "nested_workflow",
        }
    }
}

/// Errors a participant can raise while acting
#[derive(Error, Debug)]
pub enum ParticipantError {
    #[error("Inference failed: {0}")]
    Inference(#[from] GatewayError),

    #[error("Human input failed: {0}")]
    Input(#[from] HumanInputError),

    /// The inner run aborted; `inner_log` holds everything it appended.
    #[error("Nested run failed: {source}")]
    NestedRun {
        #[source]
        source: Box<WorkflowError>,
        inner_log: ConversationLog,
    },
}

/// Everything a participant may read during its turn
///
/// The log is borrowed immutably: a participant can never see a partially
/// appended message or write to the log itself.
pub struct TurnContext<'a> {
    /// Name of the workflow taking the turn
    pub workflow: &'a str,
    /// Nesting depth of that workflow (0 = outermost)
    pub depth: usize,
    /// Complete log prefix at decision time
    pub log: &'a ConversationLog,
    /// Observer, logger and cancellation inherited by nested runs
    pub hooks: &'a RunHooks,
}

/// A named actor in a workflow
#[async_trait]
pub trait Participant: Send + Sync {
    /// Unique name within the workflow
    fn id(&self) -> &ParticipantId;

    fn kind(&self) -> ParticipantKind;

    /// Produce the content of this participant's next message.
    ///
    /// The runner attributes the returned content to [`Participant::id`]
    /// and assigns its sequence number on append.
    async fn act(&self, turn: &TurnContext<'_>) -> Result<String, ParticipantError>;
}

//! Application layer for turnstile
//!
//! This crate contains the ports for external collaborators (model
//! inference, human input, rendering, transcript logging), the three
//! participant variants, and the workflow runner that drives them.
//! It depends only on the domain layer.

pub mod participants;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use participants::{
    Participant, ParticipantError, ParticipantKind, TurnContext,
    human_proxy::HumanProxy,
    llm_agent::LlmAgent,
    nested::{NestedSummary, NestedWorkflow},
    registry::ParticipantRegistry,
};
pub use ports::{
    conversation_logger::{
        ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
    },
    human_input::{FixedReplyInput, HumanInputError, HumanInputPort, HumanPrompt, ScriptedHumanInput},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    observer::{ConversationObserver, NoObserver},
};
pub use use_cases::run_workflow::{
    RunHooks, RunOutcome, RunStatus, StopReason, Workflow, WorkflowBuilder, WorkflowError,
};

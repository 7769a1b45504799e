//! Domain layer for turnstile
//!
//! This crate contains the turn-routing engine: the append-only conversation
//! log, the decision policy, the turn selectors and termination conditions.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Turn Selection
//!
//! A [`TurnSelector`] is a pure function of the conversation log. It decides
//! who speaks next by looking only at the tail of the log, so the same log
//! prefix always yields the same decision:
//!
//! - **Staged review**: productive roles run in a fixed order, each turn is
//!   followed by a human gate which either advances or retries the stage
//! - **Plan review**: a planner drafts a plan, a human approves it, then an
//!   executor (usually a nested workflow) carries it out
//!
//! ## Termination
//!
//! A [`TerminationCondition`] inspects the newest message only. When it
//! fires, the run stops even if the selector would continue.

pub mod conversation;
pub mod core;
pub mod prompt;
pub mod routing;
pub mod workflow;

// Re-export commonly used types
pub use conversation::{
    log::{ConversationLog, SEED_SOURCE},
    message::{Message, ParticipantId},
};
pub use core::{error::DomainError, model::Model};
pub use prompt::PromptTemplate;
pub use routing::{
    decision::{Decision, DecisionPolicy, DecisionPrecedence},
    plan_review::PlanReviewSelector,
    selector::TurnSelector,
    staged_review::StagedReviewSelector,
    termination::TerminationCondition,
};
pub use workflow::{
    config::{WorkflowConfig, WorkflowShape},
    roles,
};

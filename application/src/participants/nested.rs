//! Nested workflow adapter
//!
//! Presents a whole inner workflow as a single participant of an outer
//! workflow. Each turn instantiates a fresh inner run from the blueprint,
//! drains it, and answers with exactly one synthesized message.
//!
//! The inner seed only carries outer messages that arrived after the
//! adapter's own previous answer, and the seed itself never terminates the
//! inner run: a plan or an earlier crew result that happens to contain the
//! inner termination token must not short-circuit the crew.
//!
//! ```text
//! outer log ──► nested_task ──► inner Workflow::run ──► synthesize ──► one outer message
//!                                    │
//!                                    └─ inner log (never visible to the outer selector)
//! ```

use super::{Participant, ParticipantError, ParticipantKind, TurnContext};
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::run_workflow::{RunOutcome, WorkflowBuilder};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use turnstile_domain::{ConversationLog, DomainError, Model, ParticipantId, PromptTemplate};

/// How the single outer-visible message is produced from a finished inner run
#[derive(Clone)]
pub enum NestedSummary {
    /// Use the inner run's final message verbatim
    FinalMessage,
    /// Ask a model to summarize the inner transcript
    ModelSummary {
        gateway: Arc<dyn LlmGateway>,
        model: Model,
        response_prompt: String,
    },
}

impl NestedSummary {
    /// Model summary using the default response prompt.
    pub fn model(gateway: Arc<dyn LlmGateway>, model: Model) -> Self {
        Self::ModelSummary {
            gateway,
            model,
            response_prompt: PromptTemplate::nested_response_prompt().to_string(),
        }
    }
}

/// Participant that runs an entire inner workflow per turn
pub struct NestedWorkflow {
    id: ParticipantId,
    blueprint: WorkflowBuilder,
    instruction: String,
    summary: NestedSummary,
}

impl NestedWorkflow {
    /// Wrap `blueprint` as a participant named `id`.
    ///
    /// The blueprint is built once here so configuration errors surface at
    /// construction instead of on the first turn.
    pub fn new(
        id: impl Into<ParticipantId>,
        blueprint: WorkflowBuilder,
    ) -> Result<Self, DomainError> {
        blueprint.clone().build()?;
        Ok(Self {
            id: id.into(),
            blueprint,
            instruction: PromptTemplate::nested_instruction().to_string(),
            summary: NestedSummary::FinalMessage,
        })
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn with_summary(mut self, summary: NestedSummary) -> Self {
        self.summary = summary;
        self
    }

    async fn synthesize(
        &self,
        outcome: &RunOutcome,
        inner_log: &ConversationLog,
    ) -> Result<String, ParticipantError> {
        match &self.summary {
            NestedSummary::FinalMessage => Ok(outcome.final_message.content.clone()),
            NestedSummary::ModelSummary {
                gateway,
                model,
                response_prompt,
            } => {
                let session = gateway
                    .create_session_with_system_prompt(model, &self.instruction)
                    .await?;
                let prompt = PromptTemplate::nested_summary(response_prompt, inner_log.messages());
                Ok(session.send(&prompt).await?)
            }
        }
    }
}

#[async_trait]
impl Participant for NestedWorkflow {
    fn id(&self) -> &ParticipantId {
        &self.id
    }

    fn kind(&self) -> ParticipantKind {
        ParticipantKind::NestedWorkflow
    }

    async fn act(&self, turn: &TurnContext<'_>) -> Result<String, ParticipantError> {
        let fresh = turn.log.since_last_from(self.id.as_str());
        let task = PromptTemplate::nested_task(&self.instruction, fresh);

        let mut inner = self
            .blueprint
            .clone()
            .with_hooks(turn.hooks.clone())
            .with_depth(turn.depth + 1)
            .with_seed_termination(false)
            .build()
            .map_err(|e| ParticipantError::NestedRun {
                source: Box::new(e.into()),
                inner_log: ConversationLog::new(),
            })?;

        info!(participant = %self.id, inner = inner.name(), "Starting nested run");
        let result = inner.run(task).await;
        match result {
            Ok(outcome) => {
                info!(
                    participant = %self.id,
                    turns = outcome.turns,
                    stop_reason = ?outcome.stop_reason,
                    "Nested run finished"
                );
                self.synthesize(&outcome, inner.log()).await
            }
            Err(e) => {
                warn!(participant = %self.id, error = %e, "Nested run failed");
                Err(ParticipantError::NestedRun {
                    source: Box::new(e),
                    inner_log: inner.into_log(),
                })
            }
        }
    }
}

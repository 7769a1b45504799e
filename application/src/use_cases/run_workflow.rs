//! Run Workflow use case
//!
//! Drives one workflow from its seed task to a final message:
//!
//! ```text
//! append seed ──► terminal? ──yes──► done
//!                    │no
//!                    ▼
//!            ┌─► select next ──None──► done (selector exhausted)
//!            │       │
//!            │   lookup + act      (suspends: model / human / nested run)
//!            │       │
//!            │   append message
//!            │       │
//!            └─no─ terminal? ──yes──► done (termination token)
//! ```
//!
//! Only one participant acts at a time, and the runner is the only writer
//! of its log. A nested workflow runs inside its participant's `act`, so the
//! outer and inner loops form a single awaited call stack.

use crate::participants::registry::ParticipantRegistry;
use crate::participants::{Participant, ParticipantError, TurnContext};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
};
use crate::ports::human_input::HumanInputError;
use crate::ports::llm_gateway::GatewayError;
use crate::ports::observer::{ConversationObserver, NoObserver};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use turnstile_domain::{
    ConversationLog, DomainError, Message, ParticipantId, SEED_SOURCE, TerminationCondition,
    TurnSelector, WorkflowConfig,
};

/// Errors that abort a workflow run
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] DomainError),

    #[error("Inference failed for '{participant}': {source}")]
    Inference {
        participant: ParticipantId,
        #[source]
        source: GatewayError,
    },

    #[error("Human input failed for '{participant}': {source}")]
    Input {
        participant: ParticipantId,
        #[source]
        source: HumanInputError,
    },

    #[error("Nested workflow '{participant}' failed: {source}")]
    NestedRun {
        participant: ParticipantId,
        #[source]
        source: Box<WorkflowError>,
        /// Everything the inner run appended before it failed
        inner_log: ConversationLog,
    },

    #[error("Workflow '{workflow}' reached its limit of {limit} turns")]
    TurnLimitReached { workflow: String, limit: usize },

    #[error("Workflow '{0}' has already been run")]
    AlreadyStarted(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl WorkflowError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WorkflowError::Cancelled)
    }

    fn from_participant(participant: ParticipantId, error: ParticipantError) -> Self {
        match error {
            ParticipantError::Inference(source) => WorkflowError::Inference {
                participant,
                source,
            },
            ParticipantError::Input(HumanInputError::Cancelled) => WorkflowError::Cancelled,
            ParticipantError::Input(source) => WorkflowError::Input {
                participant,
                source,
            },
            ParticipantError::NestedRun { source, .. } if source.is_cancelled() => {
                WorkflowError::Cancelled
            }
            ParticipantError::NestedRun { source, inner_log } => WorkflowError::NestedRun {
                participant,
                source,
                inner_log,
            },
        }
    }
}

/// Why a run stopped normally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The selector returned no next participant
    SelectorExhausted,
    /// The termination condition fired on the newest message
    TerminationToken,
}

/// Lifecycle of a workflow instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Completed(StopReason),
    Failed,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Last message of the final log
    pub final_message: Message,
    pub stop_reason: StopReason,
    /// Number of participant turns, seed excluded
    pub turns: usize,
}

/// Side channels shared by a workflow and every workflow nested inside it
#[derive(Clone)]
pub struct RunHooks {
    pub observer: Arc<dyn ConversationObserver>,
    pub logger: Arc<dyn ConversationLogger>,
    pub cancellation: Option<CancellationToken>,
}

impl Default for RunHooks {
    fn default() -> Self {
        Self {
            observer: Arc::new(NoObserver),
            logger: Arc::new(NoConversationLogger),
            cancellation: None,
        }
    }
}

/// Builder (and reusable blueprint) for a [`Workflow`]
///
/// Cloning is cheap: participants are shared through `Arc`. A nested
/// workflow keeps a builder and builds a fresh [`Workflow`] per turn.
#[derive(Clone)]
pub struct WorkflowBuilder {
    config: WorkflowConfig,
    participants: Vec<Arc<dyn Participant>>,
    extra_termination: Option<TerminationCondition>,
    hooks: RunHooks,
    depth: usize,
    seed_terminates: bool,
}

impl WorkflowBuilder {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            participants: Vec::new(),
            extra_termination: None,
            hooks: RunHooks::default(),
            depth: 0,
            seed_terminates: true,
        }
    }

    pub fn participant(mut self, participant: impl Participant + 'static) -> Self {
        self.participants.push(Arc::new(participant));
        self
    }

    pub fn shared_participant(mut self, participant: Arc<dyn Participant>) -> Self {
        self.participants.push(participant);
        self
    }

    /// Stop when `condition` fires, in addition to the termination token.
    pub fn with_termination(mut self, condition: TerminationCondition) -> Self {
        self.extra_termination = Some(match self.extra_termination {
            Some(existing) => existing.or(condition),
            None => condition,
        });
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.hooks.observer = observer;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.hooks.logger = logger;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.hooks.cancellation = Some(token);
        self
    }

    pub fn with_hooks(mut self, hooks: RunHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Whether a seed containing the termination token ends the run
    /// before any turn. On by default.
    pub fn with_seed_termination(mut self, enabled: bool) -> Self {
        self.seed_terminates = enabled;
        self
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Validate and build a ready-to-run workflow with an empty log.
    ///
    /// Fails if names are duplicated or if the selector can route to a
    /// role that is not registered.
    pub fn build(self) -> Result<Workflow, DomainError> {
        let selector = self.config.build_selector()?;
        let registry = ParticipantRegistry::new(self.participants)?;

        for role in selector.roles() {
            if !registry.contains(&role) {
                return Err(DomainError::UnregisteredRole {
                    workflow: self.config.name.clone(),
                    role: role.to_string(),
                });
            }
        }

        let mut termination = self.config.termination();
        if let Some(extra) = self.extra_termination {
            termination = termination.or(extra);
        }

        Ok(Workflow {
            name: self.config.name,
            registry,
            selector,
            termination,
            max_turns: self.config.max_turns,
            hooks: self.hooks,
            depth: self.depth,
            seed_terminates: self.seed_terminates,
            log: ConversationLog::new(),
            status: RunStatus::Idle,
        })
    }
}

/// One workflow instance: registry, selector, termination and its own log
pub struct Workflow {
    name: String,
    registry: ParticipantRegistry,
    selector: Box<dyn TurnSelector>,
    termination: TerminationCondition,
    max_turns: Option<usize>,
    hooks: RunHooks,
    depth: usize,
    seed_terminates: bool,
    log: ConversationLog,
    status: RunStatus,
}

impl Workflow {
    pub fn builder(config: WorkflowConfig) -> WorkflowBuilder {
        WorkflowBuilder::new(config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    /// The log so far; after a failure this is the partial log.
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn into_log(self) -> ConversationLog {
        self.log
    }

    /// Run the workflow from `task` until it stops or fails.
    ///
    /// A workflow runs at most once; its log is never reset.
    pub async fn run(&mut self, task: impl Into<String>) -> Result<RunOutcome, WorkflowError> {
        if self.status != RunStatus::Idle {
            return Err(WorkflowError::AlreadyStarted(self.name.clone()));
        }
        self.status = RunStatus::Running;

        let result = self.drive(task.into()).await;
        match &result {
            Ok(outcome) => {
                self.status = RunStatus::Completed(outcome.stop_reason);
                info!(
                    workflow = %self.name,
                    turns = outcome.turns,
                    stop_reason = ?outcome.stop_reason,
                    "Workflow completed"
                );
                self.hooks.logger.log(ConversationEvent::new(
                    ConversationEventKind::RunCompleted,
                    serde_json::json!({
                        "workflow": self.name,
                        "depth": self.depth,
                        "stop_reason": outcome.stop_reason,
                        "turns": outcome.turns,
                        "final_sequence": outcome.final_message.sequence,
                    }),
                ));
                self.hooks
                    .observer
                    .on_run_complete(&self.name, self.depth, outcome);
            }
            Err(e) => {
                self.status = RunStatus::Failed;
                warn!(workflow = %self.name, error = %e, "Workflow failed");
                self.hooks.logger.log(ConversationEvent::new(
                    ConversationEventKind::RunFailed,
                    serde_json::json!({
                        "workflow": self.name,
                        "depth": self.depth,
                        "error": e.to_string(),
                        "messages": self.log.len(),
                    }),
                ));
                self.hooks.observer.on_run_failed(&self.name, self.depth, e);
            }
        }
        result
    }

    async fn drive(&mut self, task: String) -> Result<RunOutcome, WorkflowError> {
        info!(workflow = %self.name, depth = self.depth, "Starting workflow");
        self.hooks.logger.log(ConversationEvent::new(
            ConversationEventKind::RunStarted,
            serde_json::json!({
                "workflow": self.name,
                "depth": self.depth,
                "participants": self.registry.ids().map(|id| id.as_str()).collect::<Vec<_>>(),
            }),
        ));
        self.hooks.observer.on_run_start(&self.name, self.depth);

        let mut last = self.append(ParticipantId::new(SEED_SOURCE), task);
        if self.seed_terminates && self.termination.is_terminal(&last) {
            return Ok(RunOutcome {
                final_message: last,
                stop_reason: StopReason::TerminationToken,
                turns: 0,
            });
        }

        let mut turns = 0;
        loop {
            self.check_cancelled()?;

            let Some(next) = self.selector.select(self.log.messages()) else {
                debug!(workflow = %self.name, "Selector returned no participant");
                return Ok(RunOutcome {
                    final_message: last,
                    stop_reason: StopReason::SelectorExhausted,
                    turns,
                });
            };

            if let Some(limit) = self.max_turns
                && turns >= limit
            {
                return Err(WorkflowError::TurnLimitReached {
                    workflow: self.name.clone(),
                    limit,
                });
            }

            let participant = Arc::clone(self.registry.lookup(&next)?);
            debug!(workflow = %self.name, participant = %next, turn = turns + 1, "Selected participant");
            self.hooks
                .observer
                .on_turn_start(&self.name, self.depth, &next, participant.kind());

            let content = self
                .take_turn(participant.as_ref())
                .await
                .map_err(|e| WorkflowError::from_participant(next.clone(), e))?;

            turns += 1;
            last = self.append(next, content);

            if self.termination.is_terminal(&last) {
                return Ok(RunOutcome {
                    final_message: last,
                    stop_reason: StopReason::TerminationToken,
                    turns,
                });
            }
        }
    }

    async fn take_turn(&self, participant: &dyn Participant) -> Result<String, ParticipantError> {
        let turn = TurnContext {
            workflow: &self.name,
            depth: self.depth,
            log: &self.log,
            hooks: &self.hooks,
        };

        match &self.hooks.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(ParticipantError::Input(HumanInputError::Cancelled)),
                    result = participant.act(&turn) => result,
                }
            }
            None => participant.act(&turn).await,
        }
    }

    fn check_cancelled(&self) -> Result<(), WorkflowError> {
        if let Some(token) = &self.hooks.cancellation
            && token.is_cancelled()
        {
            return Err(WorkflowError::Cancelled);
        }
        Ok(())
    }

    fn append(&mut self, source: ParticipantId, content: String) -> Message {
        let message = self.log.append(source, content).clone();
        self.hooks.logger.log(ConversationEvent::new(
            ConversationEventKind::MessageAppended,
            serde_json::json!({
                "workflow": self.name,
                "depth": self.depth,
                "sequence": message.sequence,
                "source": message.source,
                "content": message.content,
            }),
        ));
        self.hooks
            .observer
            .on_message(&self.name, self.depth, &message);
        message
    }
}

//! Scripted participants and recorders shared by runner tests

use crate::participants::{Participant, ParticipantError, ParticipantKind, TurnContext};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use crate::ports::observer::ConversationObserver;
use crate::use_cases::run_workflow::RunOutcome;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use turnstile_domain::{Message, Model, ParticipantId};

/// Participant that answers from a fixed queue of replies
pub struct ScriptedParticipant {
    id: ParticipantId,
    kind: ParticipantKind,
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    /// Length of the log seen on each call
    pub seen: Mutex<Vec<usize>>,
}

impl ScriptedParticipant {
    pub fn new(id: &str, replies: &[&str]) -> Self {
        Self::with_results(id, replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn with_results(id: &str, replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            id: id.into(),
            kind: ParticipantKind::LanguageModel,
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn human(id: &str, replies: &[&str]) -> Self {
        Self {
            kind: ParticipantKind::Human,
            ..Self::new(id, replies)
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Participant for ScriptedParticipant {
    fn id(&self) -> &ParticipantId {
        &self.id
    }

    fn kind(&self) -> ParticipantKind {
        self.kind
    }

    async fn act(&self, turn: &TurnContext<'_>) -> Result<String, ParticipantError> {
        self.seen.lock().unwrap().push(turn.log.len());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other(format!("{} ran out of replies", self.id))));
        Ok(reply?)
    }
}

/// Participant whose turn never completes
pub struct StalledParticipant(pub ParticipantId);

#[async_trait]
impl Participant for StalledParticipant {
    fn id(&self) -> &ParticipantId {
        &self.0
    }

    fn kind(&self) -> ParticipantKind {
        ParticipantKind::Human
    }

    async fn act(&self, _turn: &TurnContext<'_>) -> Result<String, ParticipantError> {
        std::future::pending().await
    }
}

/// Gateway whose sessions answer from a shared queue and record prompts
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Arc<Mutex<VecDeque<String>>>,
    pub prompts: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedGateway {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.iter().map(|r| r.to_string()).collect())),
            prompts: Arc::default(),
        }
    }
}

struct ScriptedSession {
    model: Model,
    system_prompt: String,
    replies: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(ScriptedSession {
            model: model.clone(),
            system_prompt: system_prompt.to_string(),
            replies: Arc::clone(&self.replies),
            prompts: Arc::clone(&self.prompts),
        }))
    }
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.prompts
            .lock()
            .unwrap()
            .push((self.system_prompt.clone(), content.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GatewayError::RequestFailed("no scripted reply".to_string()))
    }
}

/// Observer that records `(workflow, depth, source)` for each message
#[derive(Default)]
pub struct RecordingObserver {
    pub messages: Mutex<Vec<(String, usize, String)>>,
    pub completed: Mutex<Vec<(String, usize)>>,
    pub failed: Mutex<Vec<(String, usize)>>,
}

impl ConversationObserver for RecordingObserver {
    fn on_message(&self, workflow: &str, depth: usize, message: &Message) {
        self.messages.lock().unwrap().push((
            workflow.to_string(),
            depth,
            message.source.to_string(),
        ));
    }

    fn on_run_complete(&self, workflow: &str, depth: usize, _outcome: &RunOutcome) {
        self.completed
            .lock()
            .unwrap()
            .push((workflow.to_string(), depth));
    }

    fn on_run_failed(
        &self,
        workflow: &str,
        depth: usize,
        _error: &crate::use_cases::run_workflow::WorkflowError,
    ) {
        self.failed.lock().unwrap().push((workflow.to_string(), depth));
    }
}

/// Logger that keeps every event type in order
#[derive(Default)]
pub struct RecordingLogger {
    pub events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.kind.as_str(), event.payload));
    }
}

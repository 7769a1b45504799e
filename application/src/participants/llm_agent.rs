//! Language-model backed participant

use super::{Participant, ParticipantError, ParticipantKind, TurnContext};
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use turnstile_domain::{Model, ParticipantId, PromptTemplate};

/// Agent that answers each turn with one model request
///
/// A fresh session is opened per turn with the agent's role instructions as
/// system prompt; the full conversation is sent as the user prompt.
pub struct LlmAgent {
    id: ParticipantId,
    model: Model,
    instructions: String,
    gateway: Arc<dyn LlmGateway>,
}

impl LlmAgent {
    pub fn new(
        id: impl Into<ParticipantId>,
        model: Model,
        instructions: impl Into<String>,
        gateway: Arc<dyn LlmGateway>,
    ) -> Self {
        Self {
            id: id.into(),
            model,
            instructions: instructions.into(),
            gateway,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }
}

#[async_trait]
impl Participant for LlmAgent {
    fn id(&self) -> &ParticipantId {
        &self.id
    }

    fn kind(&self) -> ParticipantKind {
        ParticipantKind::LanguageModel
    }

    async fn act(&self, turn: &TurnContext<'_>) -> Result<String, ParticipantError> {
        debug!(agent = %self.id, model = %self.model, "Requesting completion");
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, &self.instructions)
            .await?;
        let prompt = PromptTemplate::agent_turn(self.id.as_str(), turn.log.messages());
        Ok(session.send(&prompt).await?)
    }
}

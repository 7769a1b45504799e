//! Human-proxy participant

use super::{Participant, ParticipantError, ParticipantKind, TurnContext};
use crate::ports::human_input::{HumanInputPort, HumanPrompt};
use async_trait::async_trait;
use std::sync::Arc;
use turnstile_domain::ParticipantId;

/// Participant whose turns are typed by a human
///
/// The raw line becomes the message content; no validation is applied.
pub struct HumanProxy {
    id: ParticipantId,
    description: String,
    input: Arc<dyn HumanInputPort>,
}

impl HumanProxy {
    pub fn new(
        id: impl Into<ParticipantId>,
        description: impl Into<String>,
        input: Arc<dyn HumanInputPort>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            input,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[async_trait]
impl Participant for HumanProxy {
    fn id(&self) -> &ParticipantId {
        &self.id
    }

    fn kind(&self) -> ParticipantKind {
        ParticipantKind::Human
    }

    async fn act(&self, turn: &TurnContext<'_>) -> Result<String, ParticipantError> {
        let prompt = HumanPrompt {
            participant: &self.id,
            description: &self.description,
            messages: turn.log.messages(),
        };
        Ok(self.input.read_line(&prompt).await?)
    }
}

//! Participant registry

use super::Participant;
use std::sync::Arc;
use turnstile_domain::{DomainError, ParticipantId};

/// Immutable name → participant mapping for one workflow
///
/// Built once; names are unique. Participants are shared via `Arc`, so the
/// same agent can be registered in several blueprints.
#[derive(Clone)]
pub struct ParticipantRegistry {
    participants: Vec<Arc<dyn Participant>>,
}

impl ParticipantRegistry {
    pub fn new(participants: Vec<Arc<dyn Participant>>) -> Result<Self, DomainError> {
        for (i, participant) in participants.iter().enumerate() {
            let id = participant.id();
            if participants[..i].iter().any(|p| p.id() == id) {
                return Err(DomainError::DuplicateParticipant(id.to_string()));
            }
        }
        Ok(Self { participants })
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Arc<dyn Participant>> {
        self.participants.iter().find(|p| p.id() == id)
    }

    /// Look up a participant, failing with a configuration error if absent.
    pub fn lookup(&self, id: &ParticipantId) -> Result<&Arc<dyn Participant>, DomainError> {
        self.get(id)
            .ok_or_else(|| DomainError::UnknownParticipant(id.to_string()))
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.get(id).is_some()
    }

    /// Registered names in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &ParticipantId> {
        self.participants.iter().map(|p| p.id())
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

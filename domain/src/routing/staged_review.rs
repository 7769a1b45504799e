//! Staged review selector
//!
//! Productive roles run in a fixed order. Every productive turn is followed
//! by a human gate, whose decision either advances to the next stage or
//! sends the same stage back for another attempt.
//!
//! ```text
//!  seed ─► Developer ─► Gate ─approve─► Tester ─► Gate ─approve─► DocWriter ─► Gate ─approve─► (end)
//!             ▲          │               ▲         │                ▲           │
//!             └─retry────┘               └─retry───┘                └─retry─────┘
//! ```

use super::decision::{Decision, DecisionPolicy};
use super::selector::TurnSelector;
use crate::conversation::message::{Message, ParticipantId};
use crate::core::error::DomainError;

/// Selector for a sequence of productive stages separated by a human gate
#[derive(Debug, Clone)]
pub struct StagedReviewSelector {
    stages: Vec<ParticipantId>,
    gate: ParticipantId,
    policy: DecisionPolicy,
}

impl StagedReviewSelector {
    /// Create a selector over `stages` (in execution order) reviewed by `gate`.
    pub fn new(
        stages: Vec<ParticipantId>,
        gate: ParticipantId,
        policy: DecisionPolicy,
    ) -> Result<Self, DomainError> {
        if stages.is_empty() {
            return Err(DomainError::EmptyRoleSequence(gate.to_string()));
        }
        for (i, stage) in stages.iter().enumerate() {
            if stage == &gate || stages[..i].contains(stage) {
                return Err(DomainError::DuplicateParticipant(stage.to_string()));
            }
        }
        Ok(Self {
            stages,
            gate,
            policy,
        })
    }

    pub fn stages(&self) -> &[ParticipantId] {
        &self.stages
    }

    pub fn gate(&self) -> &ParticipantId {
        &self.gate
    }

    fn stage_index(&self, participant: &ParticipantId) -> Option<usize> {
        self.stages.iter().position(|s| s == participant)
    }
}

impl TurnSelector for StagedReviewSelector {
    fn select(&self, messages: &[Message]) -> Option<ParticipantId> {
        let [.., previous, last] = messages else {
            return Some(self.stages[0].clone());
        };

        if self.stage_index(&last.source).is_some() {
            return Some(self.gate.clone());
        }

        if last.source == self.gate {
            let reviewed = self.stage_index(&previous.source)?;
            return match self.policy.classify(&last.content) {
                Decision::Approve => self.stages.get(reviewed + 1).cloned(),
                Decision::Reject | Decision::Neither => Some(self.stages[reviewed].clone()),
            };
        }

        None
    }

    fn roles(&self) -> Vec<ParticipantId> {
        let mut roles = self.stages.clone();
        roles.push(self.gate.clone());
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::log::{ConversationLog, SEED_SOURCE};
    use crate::routing::decision::DecisionPrecedence;

    fn selector() -> StagedReviewSelector {
        StagedReviewSelector::new(
            vec!["Developer".into(), "Tester".into(), "DocWriter".into()],
            "InnerHumanGate".into(),
            DecisionPolicy::default(),
        )
        .unwrap()
    }

    fn log_of(turns: &[(&str, &str)]) -> ConversationLog {
        let mut log = ConversationLog::new();
        log.append(SEED_SOURCE, "build factorial function");
        for (source, content) in turns {
            log.append(*source, *content);
        }
        log
    }

    fn next(turns: &[(&str, &str)]) -> Option<String> {
        selector()
            .select(log_of(turns).messages())
            .map(|p| p.to_string())
    }

    #[test]
    fn test_empty_and_seed_only_select_first_stage() {
        assert_eq!(selector().select(&[]), Some("Developer".into()));
        assert_eq!(next(&[]).as_deref(), Some("Developer"));
    }

    #[test]
    fn test_productive_turn_goes_to_gate() {
        assert_eq!(next(&[("Developer", "code")]).as_deref(), Some("InnerHumanGate"));
        assert_eq!(
            next(&[
                ("Developer", "code"),
                ("InnerHumanGate", "approve"),
                ("Tester", "tests")
            ])
            .as_deref(),
            Some("InnerHumanGate")
        );
    }

    #[test]
    fn test_rejection_retries_same_stage() {
        assert_eq!(
            next(&[("Developer", "code"), ("InnerHumanGate", "not good")]).as_deref(),
            Some("Developer")
        );
    }

    #[test]
    fn test_neither_retries_same_stage() {
        assert_eq!(
            next(&[("Developer", "code"), ("InnerHumanGate", "handle n < 0")]).as_deref(),
            Some("Developer")
        );
    }

    #[test]
    fn test_approval_advances_to_next_stage() {
        assert_eq!(
            next(&[("Developer", "code"), ("InnerHumanGate", "looks good, approve")]).as_deref(),
            Some("Tester")
        );
        assert_eq!(
            next(&[
                ("Developer", "code"),
                ("InnerHumanGate", "approve"),
                ("Tester", "tests"),
                ("InnerHumanGate", "good")
            ])
            .as_deref(),
            Some("DocWriter")
        );
    }

    #[test]
    fn test_approval_of_last_stage_ends_workflow() {
        assert_eq!(
            next(&[
                ("Developer", "code"),
                ("InnerHumanGate", "approve"),
                ("Tester", "tests"),
                ("InnerHumanGate", "approve"),
                ("DocWriter", "docs"),
                ("InnerHumanGate", "approve")
            ]),
            None
        );
    }

    #[test]
    fn test_gate_after_gate_is_terminal_fallback() {
        assert_eq!(
            next(&[
                ("Developer", "code"),
                ("InnerHumanGate", "hmm"),
                ("InnerHumanGate", "approve")
            ]),
            None
        );
    }

    #[test]
    fn test_gate_after_seed_is_terminal_fallback() {
        assert_eq!(next(&[("InnerHumanGate", "approve")]), None);
    }

    #[test]
    fn test_unknown_source_is_terminal_fallback() {
        assert_eq!(next(&[("Stranger", "hello")]), None);
    }

    #[test]
    fn test_select_is_deterministic() {
        let log = log_of(&[("Developer", "code"), ("InnerHumanGate", "looks good")]);
        let selector = selector();
        let first = selector.select(log.messages());
        for _ in 0..10 {
            assert_eq!(selector.select(log.messages()), first);
        }
    }

    #[test]
    fn test_naive_policy_advances_on_negated_approval() {
        let selector = StagedReviewSelector::new(
            vec!["Developer".into(), "Tester".into()],
            "InnerHumanGate".into(),
            DecisionPolicy::default().with_precedence(DecisionPrecedence::ApprovalFirst),
        )
        .unwrap();
        let log = log_of(&[("Developer", "code"), ("InnerHumanGate", "not good")]);
        assert_eq!(selector.select(log.messages()), Some("Tester".into()));
    }

    #[test]
    fn test_new_rejects_empty_stages() {
        let err = StagedReviewSelector::new(vec![], "Gate".into(), DecisionPolicy::default())
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyRoleSequence(_)));
    }

    #[test]
    fn test_new_rejects_duplicate_roles() {
        let err = StagedReviewSelector::new(
            vec!["Developer".into(), "Developer".into()],
            "Gate".into(),
            DecisionPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::DuplicateParticipant("Developer".into()));

        let err = StagedReviewSelector::new(
            vec!["Gate".into()],
            "Gate".into(),
            DecisionPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::DuplicateParticipant("Gate".into()));
    }

    #[test]
    fn test_roles_include_gate() {
        let roles = selector().roles();
        assert_eq!(roles.len(), 4);
        assert_eq!(roles[3], "InnerHumanGate");
    }
}

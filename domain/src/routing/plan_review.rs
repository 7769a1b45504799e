//! Plan review selector
//!
//! ```text
//!  seed ─► Planner ─"PLAN COMPLETE"─► Gate ─approve─► Executor ─► Gate ─approve─► Executor ...
//!             ▲                        │                          │
//!             └────────other───────────┴────────other─────────────┘
//! ```
//!
//! The planner's completion marker is matched case-sensitively; the gate's
//! approval goes through the [`DecisionPolicy`].

use super::decision::DecisionPolicy;
use super::selector::TurnSelector;
use crate::conversation::message::{Message, ParticipantId};
use crate::core::error::DomainError;

/// Default marker a planner emits when its plan is ready for review.
pub const DEFAULT_PLAN_COMPLETE_TOKEN: &str = "PLAN COMPLETE";

/// Selector for a plan → approve → execute loop
#[derive(Debug, Clone)]
pub struct PlanReviewSelector {
    planner: ParticipantId,
    executor: ParticipantId,
    gate: ParticipantId,
    plan_complete_token: String,
    policy: DecisionPolicy,
}

impl PlanReviewSelector {
    pub fn new(
        planner: ParticipantId,
        executor: ParticipantId,
        gate: ParticipantId,
        plan_complete_token: impl Into<String>,
        policy: DecisionPolicy,
    ) -> Result<Self, DomainError> {
        if planner == executor || planner == gate {
            return Err(DomainError::DuplicateParticipant(planner.to_string()));
        }
        if executor == gate {
            return Err(DomainError::DuplicateParticipant(executor.to_string()));
        }
        let plan_complete_token = plan_complete_token.into();
        if plan_complete_token.is_empty() {
            return Err(DomainError::InvalidConfig(
                "plan_complete_token cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            planner,
            executor,
            gate,
            plan_complete_token,
            policy,
        })
    }

    pub fn planner(&self) -> &ParticipantId {
        &self.planner
    }

    pub fn executor(&self) -> &ParticipantId {
        &self.executor
    }

    pub fn gate(&self) -> &ParticipantId {
        &self.gate
    }
}

impl TurnSelector for PlanReviewSelector {
    fn select(&self, messages: &[Message]) -> Option<ParticipantId> {
        let [_, .., last] = messages else {
            return Some(self.planner.clone());
        };

        if last.source == self.planner && last.content.contains(&self.plan_complete_token) {
            return Some(self.gate.clone());
        }
        if last.source == self.gate && self.policy.is_approval(&last.content) {
            return Some(self.executor.clone());
        }
        if last.source == self.executor {
            return Some(self.gate.clone());
        }
        if last.source == self.gate {
            return Some(self.planner.clone());
        }

        None
    }

    fn roles(&self) -> Vec<ParticipantId> {
        vec![
            self.planner.clone(),
            self.executor.clone(),
            self.gate.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::log::{ConversationLog, SEED_SOURCE};

    fn selector() -> PlanReviewSelector {
        PlanReviewSelector::new(
            "Planner".into(),
            "DevCrew".into(),
            "OuterHumanGate".into(),
            DEFAULT_PLAN_COMPLETE_TOKEN,
            DecisionPolicy::new(["approve"]),
        )
        .unwrap()
    }

    fn next(turns: &[(&str, &str)]) -> Option<String> {
        let mut log = ConversationLog::new();
        log.append(SEED_SOURCE, "build factorial function");
        for (source, content) in turns {
            log.append(*source, *content);
        }
        selector().select(log.messages()).map(|p| p.to_string())
    }

    #[test]
    fn test_seed_selects_planner() {
        assert_eq!(next(&[]).as_deref(), Some("Planner"));
        assert_eq!(selector().select(&[]), Some("Planner".into()));
    }

    #[test]
    fn test_completed_plan_goes_to_gate() {
        assert_eq!(
            next(&[("Planner", "1. write code\n2. test\nPLAN COMPLETE")]).as_deref(),
            Some("OuterHumanGate")
        );
    }

    #[test]
    fn test_plan_marker_is_case_sensitive() {
        assert_eq!(next(&[("Planner", "plan complete")]), None);
    }

    #[test]
    fn test_unfinished_plan_ends_workflow() {
        assert_eq!(next(&[("Planner", "still thinking")]), None);
    }

    #[test]
    fn test_approved_plan_goes_to_executor() {
        assert_eq!(
            next(&[
                ("Planner", "PLAN COMPLETE"),
                ("OuterHumanGate", "I approve this plan")
            ])
            .as_deref(),
            Some("DevCrew")
        );
    }

    #[test]
    fn test_gate_without_approval_replans() {
        assert_eq!(
            next(&[("Planner", "PLAN COMPLETE"), ("OuterHumanGate", "add a step for docs")])
                .as_deref(),
            Some("Planner")
        );
    }

    #[test]
    fn test_outer_gate_ignores_good_without_approve() {
        assert_eq!(
            next(&[("Planner", "PLAN COMPLETE"), ("OuterHumanGate", "looks good")]).as_deref(),
            Some("Planner")
        );
    }

    #[test]
    fn test_executor_result_goes_to_gate() {
        assert_eq!(
            next(&[
                ("Planner", "PLAN COMPLETE"),
                ("OuterHumanGate", "approve"),
                ("DevCrew", "summary of work")
            ])
            .as_deref(),
            Some("OuterHumanGate")
        );
    }

    #[test]
    fn test_unknown_source_ends_workflow() {
        assert_eq!(next(&[("Developer", "code")]), None);
    }

    #[test]
    fn test_new_rejects_shared_names() {
        let err = PlanReviewSelector::new(
            "Planner".into(),
            "Planner".into(),
            "Gate".into(),
            DEFAULT_PLAN_COMPLETE_TOKEN,
            DecisionPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::DuplicateParticipant("Planner".into()));
    }

    #[test]
    fn test_new_rejects_empty_plan_token() {
        let err = PlanReviewSelector::new(
            "Planner".into(),
            "DevCrew".into(),
            "Gate".into(),
            "",
            DecisionPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfig(_)));
    }
}

//! Declarative workflow configuration

use crate::conversation::message::ParticipantId;
use crate::core::error::DomainError;
use crate::routing::decision::{
    DEFAULT_REJECTION_TOKENS, DecisionPolicy, DecisionPrecedence,
};
use crate::routing::plan_review::{DEFAULT_PLAN_COMPLETE_TOKEN, PlanReviewSelector};
use crate::routing::selector::TurnSelector;
use crate::routing::staged_review::StagedReviewSelector;
use crate::routing::termination::TerminationCondition;
use serde::{Deserialize, Serialize};

fn default_plan_complete_token() -> String {
    DEFAULT_PLAN_COMPLETE_TOKEN.to_string()
}

/// Which selector state machine a workflow runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkflowShape {
    /// Productive stages in order, each reviewed by `gate`
    StagedReview {
        stages: Vec<ParticipantId>,
        gate: ParticipantId,
    },
    /// Planner drafts, `gate` approves, `executor` carries the plan out
    PlanReview {
        planner: ParticipantId,
        executor: ParticipantId,
        gate: ParticipantId,
        #[serde(default = "default_plan_complete_token")]
        plan_complete_token: String,
    },
}

/// Configuration for one workflow instance
///
/// Turned into a selector with [`WorkflowConfig::build_selector`] and into a
/// termination predicate with [`WorkflowConfig::termination`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Name used in logs and rendering
    pub name: String,
    pub shape: WorkflowShape,
    /// Case-sensitive token that ends the run when it appears in a message
    pub termination_token: String,
    /// Case-insensitive tokens a gate uses to approve
    pub approval_tokens: Vec<String>,
    /// Case-insensitive cues a gate uses to reject
    pub rejection_tokens: Vec<String>,
    pub decision_precedence: DecisionPrecedence,
    /// Must be true for both built-in shapes, which retry the same role
    pub allow_repeated_speaker: bool,
    /// Optional cap on participant turns; `None` runs until the selector or
    /// termination token stops it
    pub max_turns: Option<usize>,
}

impl WorkflowConfig {
    /// Staged review workflow with `FINALIZE` termination and
    /// `good`/`approve` approval tokens.
    pub fn staged_review(
        name: impl Into<String>,
        stages: Vec<ParticipantId>,
        gate: ParticipantId,
    ) -> Self {
        Self {
            name: name.into(),
            shape: WorkflowShape::StagedReview { stages, gate },
            termination_token: "FINALIZE".to_string(),
            approval_tokens: vec!["good".to_string(), "approve".to_string()],
            rejection_tokens: DEFAULT_REJECTION_TOKENS.iter().map(|t| t.to_string()).collect(),
            decision_precedence: DecisionPrecedence::default(),
            allow_repeated_speaker: true,
            max_turns: None,
        }
    }

    /// Plan review workflow with `TERMINATE` termination and `approve`
    /// as the only approval token.
    pub fn plan_review(
        name: impl Into<String>,
        planner: ParticipantId,
        executor: ParticipantId,
        gate: ParticipantId,
    ) -> Self {
        Self {
            name: name.into(),
            shape: WorkflowShape::PlanReview {
                planner,
                executor,
                gate,
                plan_complete_token: default_plan_complete_token(),
            },
            termination_token: "TERMINATE".to_string(),
            approval_tokens: vec!["approve".to_string()],
            rejection_tokens: DEFAULT_REJECTION_TOKENS.iter().map(|t| t.to_string()).collect(),
            decision_precedence: DecisionPrecedence::default(),
            allow_repeated_speaker: true,
            max_turns: None,
        }
    }

    pub fn with_termination_token(mut self, token: impl Into<String>) -> Self {
        self.termination_token = token.into();
        self
    }

    pub fn with_approval_tokens(mut self, tokens: Vec<String>) -> Self {
        self.approval_tokens = tokens;
        self
    }

    pub fn with_precedence(mut self, precedence: DecisionPrecedence) -> Self {
        self.decision_precedence = precedence;
        self
    }

    pub fn with_max_turns(mut self, max_turns: Option<usize>) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_allow_repeated_speaker(mut self, allow: bool) -> Self {
        self.allow_repeated_speaker = allow;
        self
    }

    pub fn decision_policy(&self) -> DecisionPolicy {
        DecisionPolicy::new(&self.approval_tokens)
            .with_rejection_tokens(&self.rejection_tokens)
            .with_precedence(self.decision_precedence)
    }

    pub fn termination(&self) -> TerminationCondition {
        TerminationCondition::text_mention(&self.termination_token)
    }

    /// Validate the configuration and build its selector.
    pub fn build_selector(&self) -> Result<Box<dyn TurnSelector>, DomainError> {
        if self.termination_token.is_empty() {
            return Err(DomainError::InvalidConfig(format!(
                "workflow '{}' has an empty termination_token",
                self.name
            )));
        }
        if self.approval_tokens.iter().all(|t| t.trim().is_empty()) {
            return Err(DomainError::InvalidConfig(format!(
                "workflow '{}' has no approval tokens",
                self.name
            )));
        }
        // Both shapes route a rejected stage back to the role that just spoke.
        if !self.allow_repeated_speaker {
            return Err(DomainError::RepeatedSpeakerRequired(self.name.clone()));
        }

        let policy = self.decision_policy();
        match &self.shape {
            WorkflowShape::StagedReview { stages, gate } => Ok(Box::new(
                StagedReviewSelector::new(stages.clone(), gate.clone(), policy)
                    .map_err(|e| self.name_empty_sequence(e))?,
            )),
            WorkflowShape::PlanReview {
                planner,
                executor,
                gate,
                plan_complete_token,
            } => Ok(Box::new(PlanReviewSelector::new(
                planner.clone(),
                executor.clone(),
                gate.clone(),
                plan_complete_token.clone(),
                policy,
            )?)),
        }
    }

    fn name_empty_sequence(&self, error: DomainError) -> DomainError {
        match error {
            DomainError::EmptyRoleSequence(_) => DomainError::EmptyRoleSequence(self.name.clone()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::log::{ConversationLog, SEED_SOURCE};

    fn inner() -> WorkflowConfig {
        WorkflowConfig::staged_review(
            "inner",
            vec!["Developer".into(), "Tester".into()],
            "Gate".into(),
        )
    }

    #[test]
    fn test_build_selector_for_staged_review() {
        let selector = inner().build_selector().unwrap();
        let mut log = ConversationLog::new();
        log.append(SEED_SOURCE, "task");
        assert_eq!(selector.select(log.messages()), Some("Developer".into()));
        assert_eq!(selector.roles().len(), 3);
    }

    #[test]
    fn test_repeated_speaker_is_required() {
        let err = inner()
            .with_allow_repeated_speaker(false)
            .build_selector()
            .unwrap_err();
        assert_eq!(err, DomainError::RepeatedSpeakerRequired("inner".into()));
    }

    #[test]
    fn test_empty_termination_token_is_rejected() {
        let err = inner()
            .with_termination_token("")
            .build_selector()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_stage_list_names_the_workflow() {
        let err = WorkflowConfig::staged_review("crew", vec![], "Gate".into())
            .build_selector()
            .unwrap_err();
        assert_eq!(err, DomainError::EmptyRoleSequence("crew".into()));
    }

    #[test]
    fn test_plan_review_defaults() {
        let config = WorkflowConfig::plan_review(
            "outer",
            "Planner".into(),
            "DevCrew".into(),
            "Gate".into(),
        );
        assert_eq!(config.termination_token, "TERMINATE");
        assert_eq!(config.approval_tokens, vec!["approve".to_string()]);
        assert!(config.build_selector().is_ok());
    }

    #[test]
    fn test_decision_policy_follows_config() {
        let policy = inner()
            .with_precedence(DecisionPrecedence::ApprovalFirst)
            .decision_policy();
        assert_eq!(policy.precedence(), DecisionPrecedence::ApprovalFirst);
        assert_eq!(policy.approval_tokens().len(), 2);
    }

    #[test]
    fn test_shape_deserializes_with_default_plan_token() {
        let shape: WorkflowShape = serde_json::from_value(serde_json::json!({
            "kind": "plan_review",
            "planner": "Planner",
            "executor": "DevCrew",
            "gate": "Gate"
        }))
        .unwrap();
        match shape {
            WorkflowShape::PlanReview {
                plan_complete_token,
                ..
            } => assert_eq!(plan_complete_token, "PLAN COMPLETE"),
            other => panic!("unexpected shape: {other:?}"),
        }
    }
}

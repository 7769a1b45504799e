//! Workflow overrides from TOML (`[outer]` and `[inner]` sections)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use turnstile_domain::{DecisionPrecedence, WorkflowConfig, WorkflowShape};

/// Optional overrides applied on top of a workflow preset
///
/// # Example
///
/// ```toml
/// [inner]
/// termination_token = "FINALIZE"
/// approval_tokens = ["good", "approve", "lgtm"]
/// decision_precedence = "rejection_first"
/// max_turns = 40
///
/// [outer]
/// plan_complete_token = "PLAN COMPLETE"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    pub termination_token: Option<String>,
    pub approval_tokens: Option<Vec<String>>,
    pub rejection_tokens: Option<Vec<String>>,
    pub decision_precedence: Option<DecisionPrecedence>,
    pub max_turns: Option<usize>,
    /// Only meaningful for plan/review workflows
    pub plan_complete_token: Option<String>,
}

impl FileWorkflowConfig {
    pub fn validate(&self, section: &str) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        if self.termination_token.as_ref().is_some_and(|t| t.is_empty()) {
            errors.push(ConfigValidationError::EmptyTerminationToken(section.to_string()));
        }
        if self
            .approval_tokens
            .as_ref()
            .is_some_and(|tokens| tokens.iter().all(|t| t.trim().is_empty()))
        {
            errors.push(ConfigValidationError::NoApprovalTokens(section.to_string()));
        }
        if self.max_turns == Some(0) {
            errors.push(ConfigValidationError::ZeroTurnLimit(section.to_string()));
        }
        errors
    }

    /// Apply the overrides that are set to `base`.
    pub fn apply(&self, mut base: WorkflowConfig) -> WorkflowConfig {
        if let Some(token) = &self.termination_token {
            base.termination_token = token.clone();
        }
        if let Some(tokens) = &self.approval_tokens {
            base.approval_tokens = tokens.clone();
        }
        if let Some(tokens) = &self.rejection_tokens {
            base.rejection_tokens = tokens.clone();
        }
        if let Some(precedence) = self.decision_precedence {
            base.decision_precedence = precedence;
        }
        if self.max_turns.is_some() {
            base.max_turns = self.max_turns;
        }
        if let Some(token) = &self.plan_complete_token
            && let WorkflowShape::PlanReview {
                plan_complete_token,
                ..
            } = &mut base.shape
        {
            *plan_complete_token = token.clone();
        }
        base
    }
}

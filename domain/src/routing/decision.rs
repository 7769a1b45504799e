//! Approval decisions derived from free-text message content
//!
//! Human gates signal approval in prose ("looks good, approve"). This module
//! is the single place where that prose is turned into a [`Decision`].

use serde::{Deserialize, Serialize};

/// Classification of a message's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approve,
    Reject,
    Neither,
}

/// Which token set wins when a message matches both
///
/// Matching is plain substring search, so "not good" contains the approval
/// token "good". `RejectionFirst` lets rejection cues override approval
/// tokens. `ApprovalFirst` reproduces naive matching, where any approval
/// token approves regardless of negation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPrecedence {
    #[default]
    RejectionFirst,
    ApprovalFirst,
}

/// Default approval tokens for stage gates.
pub const DEFAULT_APPROVAL_TOKENS: &[&str] = &["good", "approve"];

/// Default rejection cues.
pub const DEFAULT_REJECTION_TOKENS: &[&str] = &[
    "not good",
    "no good",
    "not approve",
    "don't approve",
    "do not approve",
    "disapprove",
    "reject",
];

/// Token-matching policy that classifies content into a [`Decision`]
///
/// Matching is case-insensitive substring search over the whole content.
/// Tokens are normalized to lowercase once, at construction; empty tokens
/// are discarded since they would match everything.
///
/// # Example
///
/// ```
/// use turnstile_domain::{Decision, DecisionPolicy};
///
/// let policy = DecisionPolicy::default();
/// assert_eq!(policy.classify("Looks GOOD, approve"), Decision::Approve);
/// assert_eq!(policy.classify("not good"), Decision::Reject);
/// assert_eq!(policy.classify("fix the edge cases"), Decision::Neither);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionPolicy {
    approval_tokens: Vec<String>,
    rejection_tokens: Vec<String>,
    precedence: DecisionPrecedence,
}

impl DecisionPolicy {
    /// Policy with the given approval tokens and the default rejection cues.
    pub fn new<I, S>(approval_tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            approval_tokens: normalize(approval_tokens),
            rejection_tokens: normalize(DEFAULT_REJECTION_TOKENS),
            precedence: DecisionPrecedence::default(),
        }
    }

    /// Replace the rejection cues.
    pub fn with_rejection_tokens<I, S>(mut self, rejection_tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rejection_tokens = normalize(rejection_tokens);
        self
    }

    pub fn with_precedence(mut self, precedence: DecisionPrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn approval_tokens(&self) -> &[String] {
        &self.approval_tokens
    }

    pub fn rejection_tokens(&self) -> &[String] {
        &self.rejection_tokens
    }

    pub fn precedence(&self) -> DecisionPrecedence {
        self.precedence
    }

    /// Classify message content.
    pub fn classify(&self, content: &str) -> Decision {
        let content = content.to_lowercase();
        let approved = self.approval_tokens.iter().any(|t| content.contains(t));
        let rejected = self.rejection_tokens.iter().any(|t| content.contains(t));

        match self.precedence {
            DecisionPrecedence::RejectionFirst if rejected => Decision::Reject,
            DecisionPrecedence::RejectionFirst if approved => Decision::Approve,
            DecisionPrecedence::ApprovalFirst if approved => Decision::Approve,
            DecisionPrecedence::ApprovalFirst if rejected => Decision::Reject,
            _ => Decision::Neither,
        }
    }

    pub fn is_approval(&self, content: &str) -> bool {
        self.classify(content) == Decision::Approve
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_APPROVAL_TOKENS)
    }
}

fn normalize<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

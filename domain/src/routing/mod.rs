//! Turn routing domain
//!
//! # Architecture
//!
//! ```text
//! ConversationLog ──► TurnSelector::select ──► Some(next) / None
//!        │
//!        └─ newest message ──► TerminationCondition::is_terminal
//!
//! Human gate content ──► DecisionPolicy::classify ──► Approve / Reject / Neither
//! ```
//!
//! Selectors and termination conditions hold no mutable state. Everything
//! they need is recomputed from the log on every call.

pub mod decision;
pub mod plan_review;
pub mod selector;
pub mod staged_review;
pub mod termination;

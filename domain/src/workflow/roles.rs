//! Participant names and presets for the two-level build workflow
//!
//! The outer workflow plans and reviews; its executor is the inner crew,
//! which writes code, tests and documentation behind its own human gate.

use super::config::WorkflowConfig;
use crate::conversation::message::ParticipantId;

pub const DEVELOPER: &str = "Developer";
pub const TESTER: &str = "Tester";
pub const DOC_WRITER: &str = "DocWriter";
pub const INNER_GATE: &str = "InnerHumanGate";

pub const PLANNER: &str = "Planner";
pub const CREW: &str = "DevCrew";
pub const OUTER_GATE: &str = "OuterHumanGate";

/// Inner crew: Developer → Tester → DocWriter, each reviewed by the inner gate.
pub fn inner_workflow() -> WorkflowConfig {
    WorkflowConfig::staged_review(
        "crew",
        vec![DEVELOPER.into(), TESTER.into(), DOC_WRITER.into()],
        INNER_GATE.into(),
    )
}

/// Outer workflow: Planner → gate → crew (nested) → gate.
pub fn outer_workflow() -> WorkflowConfig {
    WorkflowConfig::plan_review(
        "project",
        PLANNER.into(),
        CREW.into(),
        OUTER_GATE.into(),
    )
}

/// Names of every participant that lives inside the crew.
pub fn inner_participants() -> [ParticipantId; 4] {
    [
        DEVELOPER.into(),
        TESTER.into(),
        DOC_WRITER.into(),
        INNER_GATE.into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_build() {
        assert!(inner_workflow().build_selector().is_ok());
        assert!(outer_workflow().build_selector().is_ok());
    }

    #[test]
    fn test_outer_roles_do_not_overlap_inner_roles() {
        let outer = outer_workflow().build_selector().unwrap().roles();
        for inner in inner_participants() {
            assert!(!outer.contains(&inner));
        }
    }
}

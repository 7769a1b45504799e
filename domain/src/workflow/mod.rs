//! Workflow construction
//!
//! - [`config::WorkflowConfig`]: declarative description of one workflow
//! - [`roles`]: the participant names and presets of the two-level
//!   plan / build / review workflow

pub mod config;
pub mod roles;

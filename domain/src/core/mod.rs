//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] : identifier of the language model backing an agent
//! - [`error::DomainError`] : configuration errors raised while building workflows

pub mod error;
pub mod model;

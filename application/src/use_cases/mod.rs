//! Use cases (application services)
//!
//! Use cases orchestrate domain logic and coordinate with external
//! adapters through ports.

pub mod run_workflow;

#[cfg(test)]
pub(crate) mod test_support;

//! Console rendering of workflow runs

pub mod console;

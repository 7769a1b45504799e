//! Presentation layer for turnstile
//!
//! This crate contains the CLI definition, the console renderer that
//! observes workflow runs, and the terminal adapter for human gates.

pub mod cli;
pub mod input;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, SummaryArg};
pub use input::InteractiveHumanInput;
pub use output::console::ConsoleRenderer;

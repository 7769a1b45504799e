//! Terminal adapters for the human input port

pub mod stdin;

pub use stdin::InteractiveHumanInput;

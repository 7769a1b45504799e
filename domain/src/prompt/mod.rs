//! Prompt templates for workflow participants

mod template;

pub use template::PromptTemplate;

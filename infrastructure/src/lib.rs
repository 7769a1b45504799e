//! Infrastructure layer for turnstile
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: an OpenAI-compatible LLM gateway, the JSONL
//! transcript logger, and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileModelsConfig,
    FileNestedConfig, FileOutputConfig, FileProviderConfig, FileSummaryMode, FileWorkflowConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{OpenAiCompatibleGateway, OpenAiSession};

//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod models;
mod nested;
mod output;
mod provider;
mod workflow;

pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use nested::{FileNestedConfig, FileSummaryMode};
pub use output::FileOutputConfig;
pub use provider::FileProviderConfig;
pub use workflow::FileWorkflowConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found in an otherwise well-formed config file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("provider.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("models.{0}: model name cannot be empty")]
    EmptyModelName(String),

    #[error("{0}.termination_token cannot be empty")]
    EmptyTerminationToken(String),

    #[error("{0}.approval_tokens must contain at least one non-empty token")]
    NoApprovalTokens(String),

    #[error("{0}.max_turns cannot be 0")]
    ZeroTurnLimit(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// OpenAI-compatible endpoint settings
    pub provider: FileProviderConfig,
    /// Per-role model selection
    pub models: FileModelsConfig,
    /// Overrides for the outer plan/review workflow
    pub outer: FileWorkflowConfig,
    /// Overrides for the inner dev/test/doc crew
    pub inner: FileWorkflowConfig,
    /// How the crew reports back to the outer workflow
    pub nested: FileNestedConfig,
    /// Console rendering
    pub output: FileOutputConfig,
    /// Structured transcript logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        errors.extend(self.provider.validate());
        errors.extend(self.models.validate());
        errors.extend(self.outer.validate("outer"));
        errors.extend(self.inner.validate("inner"));
        errors
    }

    /// Render the merged configuration as TOML (for `--show-config`).
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnstile_domain::DecisionPrecedence;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
base_url = "http://localhost:11434/v1"
api_key_env = "LOCAL_KEY"
timeout_seconds = 30

[models]
default = "llama3.1"
planner = "qwen2.5"

[outer]
max_turns = 20

[inner]
termination_token = "SHIP IT"
approval_tokens = ["lgtm"]
decision_precedence = "approval_first"

[nested]
summary = "final_message"

[output]
color = false

[logging]
conversation_log = "run.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.base_url, "http://localhost:11434/v1");
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.models.default.as_deref(), Some("llama3.1"));
        assert_eq!(config.outer.max_turns, Some(20));
        assert_eq!(config.inner.termination_token.as_deref(), Some("SHIP IT"));
        assert_eq!(
            config.inner.decision_precedence,
            Some(DecisionPrecedence::ApprovalFirst)
        );
        assert_eq!(config.nested.summary, FileSummaryMode::FinalMessage);
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[models]
developer = "gpt-4.1"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.models.developer.as_deref(), Some("gpt-4.1"));
        // Defaults should apply
        assert_eq!(config.provider.api_key_env, "GOOGLE_API_KEY");
        assert_eq!(config.nested.summary, FileSummaryMode::ModelSummary);
        assert!(config.output.color);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let toml_str = r#"
[provider]
timeout_seconds = 0

[models]
tester = "  "

[inner]
termination_token = ""
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            vec![
                ConfigValidationError::InvalidTimeout,
                ConfigValidationError::EmptyModelName("tester".to_string()),
                ConfigValidationError::EmptyTerminationToken("inner".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let rendered = FileConfig::default().to_toml_string().unwrap();
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.provider.base_url, FileConfig::default().provider.base_url);
    }
}

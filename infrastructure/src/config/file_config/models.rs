//! Role-based model configuration from TOML (`[models]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use turnstile_domain::{Model, roles};

/// Role-based model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// default = "gemini-2.5-pro"   # Used by every role without an override
/// planner = "gemini-2.5-pro"
/// developer = "gpt-4.1"
/// tester = "gpt-4.1-mini"
/// doc_writer = "gpt-4.1-mini"
/// summary = "gpt-4.1-mini"     # Nested run summary (summary = "model_summary")
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub default: Option<String>,
    pub planner: Option<String>,
    pub developer: Option<String>,
    pub tester: Option<String>,
    pub doc_writer: Option<String>,
    pub summary: Option<String>,
}

impl FileModelsConfig {
    fn fields(&self) -> [(&'static str, Option<&String>); 6] {
        [
            ("default", self.default.as_ref()),
            ("planner", self.planner.as_ref()),
            ("developer", self.developer.as_ref()),
            ("tester", self.tester.as_ref()),
            ("doc_writer", self.doc_writer.as_ref()),
            ("summary", self.summary.as_ref()),
        ]
    }

    pub fn validate(&self) -> Vec<ConfigValidationError> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| value.is_some_and(|v| v.trim().is_empty()))
            .map(|(field, _)| ConfigValidationError::EmptyModelName(field.to_string()))
            .collect()
    }

    /// Model used when a role has no override.
    pub fn default_model(&self) -> Model {
        Self::parse(self.default.as_ref()).unwrap_or_default()
    }

    /// Model for a participant of the build workflow, by name.
    ///
    /// Unknown names and roles without an override get the default model.
    pub fn for_role(&self, role: &str) -> Model {
        let specific = match role {
            roles::PLANNER => self.planner.as_ref(),
            roles::DEVELOPER => self.developer.as_ref(),
            roles::TESTER => self.tester.as_ref(),
            roles::DOC_WRITER => self.doc_writer.as_ref(),
            _ => None,
        };
        Self::parse(specific).unwrap_or_else(|| self.default_model())
    }

    /// Model for nested run summaries.
    pub fn summary_model(&self) -> Model {
        Self::parse(self.summary.as_ref()).unwrap_or_else(|| self.default_model())
    }

    fn parse(value: Option<&String>) -> Option<Model> {
        value
            .filter(|s| !s.trim().is_empty())
            .map(|s| Model::new(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_override_then_default() {
        let config = FileModelsConfig {
            default: Some("llama3.1".to_string()),
            developer: Some("qwen2.5-coder".to_string()),
            ..Default::default()
        };
        assert_eq!(config.for_role(roles::DEVELOPER).as_str(), "qwen2.5-coder");
        assert_eq!(config.for_role(roles::TESTER).as_str(), "llama3.1");
        assert_eq!(config.summary_model().as_str(), "llama3.1");
    }

    #[test]
    fn test_nothing_configured_uses_builtin_default() {
        let config = FileModelsConfig::default();
        assert_eq!(config.for_role(roles::PLANNER), Model::default());
    }

    #[test]
    fn test_blank_override_falls_back_and_is_reported() {
        let config = FileModelsConfig {
            planner: Some("".to_string()),
            ..Default::default()
        };
        assert_eq!(config.for_role(roles::PLANNER), Model::default());
        assert_eq!(
            config.validate(),
            vec![ConfigValidationError::EmptyModelName("planner".to_string())]
        );
    }
}

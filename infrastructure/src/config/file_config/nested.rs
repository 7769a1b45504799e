//! Nested crew configuration from TOML (`[nested]` section)

use serde::{Deserialize, Serialize};

/// How the crew's run is turned into its single outer message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileSummaryMode {
    /// The inner run's final message, verbatim
    FinalMessage,
    /// A model summary of the inner transcript
    #[default]
    ModelSummary,
}

impl std::str::FromStr for FileSummaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "final" | "final_message" => Ok(Self::FinalMessage),
            "model" | "model_summary" => Ok(Self::ModelSummary),
            other => Err(format!(
                "unknown summary mode '{}', expected 'final' or 'model'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNestedConfig {
    pub summary: FileSummaryMode,
    /// Replaces the instruction prepended to the crew's task
    pub instruction: Option<String>,
    /// Replaces the prompt used for model summaries
    pub response_prompt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mode_from_cli_aliases() {
        assert_eq!("final".parse::<FileSummaryMode>(), Ok(FileSummaryMode::FinalMessage));
        assert_eq!("Model".parse::<FileSummaryMode>(), Ok(FileSummaryMode::ModelSummary));
        assert!("verbose".parse::<FileSummaryMode>().is_err());
    }

    #[test]
    fn test_crew_reports_through_model_summary_by_default() {
        let config: FileNestedConfig = toml::from_str("").unwrap();
        assert_eq!(config.summary, FileSummaryMode::ModelSummary);

        let config: FileNestedConfig = toml::from_str(r#"summary = "final_message""#).unwrap();
        assert_eq!(config.summary, FileSummaryMode::FinalMessage);
    }
}

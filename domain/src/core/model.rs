//! Model value object representing an LLM model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the model an agent talks to (Value Object)
///
/// Providers accept arbitrary model names, so this is a thin wrapper
/// around the string the backend expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get a short display name for the model
    ///
    /// E.g., "gemini-2.5-pro" -> "gemini"
    pub fn short_name(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or(&self.0)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new("gemini-2.5-pro")
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_parse_trims() {
        let model: Model = " gpt-4.1 ".parse().unwrap();
        assert_eq!(model.as_str(), "gpt-4.1");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(Model::new("gemini-2.5-pro").short_name(), "gemini");
        assert_eq!(Model::new("llama3").short_name(), "llama3");
    }

    #[test]
    fn test_serde_is_plain_string() {
        let json = serde_json::to_string(&Model::new("gpt-4.1")).unwrap();
        assert_eq!(json, "\"gpt-4.1\"");
    }
}

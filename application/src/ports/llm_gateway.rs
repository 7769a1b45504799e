//! Chat-completion port used by model-backed participants
//!
//! One session is opened per turn. The core never retries: a failed request
//! aborts the current run.

use async_trait::async_trait;
use thiserror::Error;
use turnstile_domain::Model;

/// Failure reported by a provider adapter
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Opens chat sessions against a model provider.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Open a session whose system message is `system_prompt`
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// A single-use chat session
#[async_trait]
pub trait LlmSession: Send + Sync {
    fn model(&self) -> &Model;

    /// Send one user message and return the assistant text
    async fn send(&self, content: &str) -> Result<String, GatewayError>;
}

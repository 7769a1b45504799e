//! OpenAI-compatible chat completions adapter
//!
//! Works with any backend exposing `POST {base_url}/chat/completions`
//! (OpenAI, Gemini's OpenAI endpoint, Ollama, vLLM, ...). Each session is a
//! single system prompt plus one user message per `send`; the workflow
//! already puts the whole conversation into that message.

use crate::config::FileProviderConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};
use turnstile_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use turnstile_domain::Model;

const ERROR_BODY_PREVIEW: usize = 320;

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Value,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Gateway for OpenAI-compatible HTTP endpoints
pub struct OpenAiCompatibleGateway {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    api_key_env: String,
    temperature: Option<f32>,
}

impl OpenAiCompatibleGateway {
    /// Build a gateway from the `[provider]` section.
    ///
    /// A missing API key is not an error here; the first session reports it.
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: resolve_chat_endpoint(&config.base_url),
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            GatewayError::MissingCredentials(format!(
                "set {} or provider.api_key",
                self.api_key_env
            ))
        })?;

        Ok(Box::new(OpenAiSession {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            api_key,
            model: model.clone(),
            system_prompt: system_prompt.to_string(),
            temperature: self.temperature,
        }))
    }
}

/// One model plus system prompt bound to an endpoint
pub struct OpenAiSession {
    client: Client,
    endpoint: String,
    api_key: String,
    model: Model,
    system_prompt: String,
    temperature: Option<f32>,
}

impl OpenAiSession {
    fn payload(&self, content: &str) -> Value {
        let mut messages = Vec::new();
        if !self.system_prompt.trim().is_empty() {
            messages.push(json!({
                "role": "system",
                "content": self.system_prompt,
            }));
        }
        messages.push(json!({
            "role": "user",
            "content": content,
        }));

        let mut payload = json!({
            "model": self.model.as_str(),
            "messages": messages,
        });
        if let Some(temperature) = self.temperature {
            payload["temperature"] = json!(temperature);
        }
        payload
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        debug!(model = %self.model, endpoint = %self.endpoint, bytes = content.len(), "Sending chat completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.payload(content))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(model = %self.model, %status, "Chat completion rejected");
            return Err(GatewayError::RequestFailed(format!(
                "{} error {}: {}",
                self.model,
                status,
                preview(&body)
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        parse_choice(body)
    }
}

fn map_reqwest_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

fn parse_choice(body: ChatResponse) -> Result<String, GatewayError> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("response did not include choices".into()))?;

    if let Some(reason) = &choice.finish_reason {
        debug!(finish_reason = %reason, "Chat completion finished");
    }

    let text = extract_text(&choice.message.content);
    if text.is_empty() {
        return Err(GatewayError::InvalidResponse(
            "response message had no text content".into(),
        ));
    }
    Ok(text)
}

/// First characters of an error body, for error messages.
fn preview(body: &str) -> String {
    let mut chars = body.trim().chars();
    let head: String = chars.by_ref().take(ERROR_BODY_PREVIEW).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Append `/chat/completions` unless the URL already points there.
pub fn resolve_chat_endpoint(base_url: &str) -> String {
    let base_url = base_url.trim();
    if base_url.contains("/chat/completions") {
        base_url.to_string()
    } else {
        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }
}

/// Content is either a string or a list of typed parts.
fn extract_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.trim().to_string(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("")
            .trim()
            .to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_chat_endpoint() {
        assert_eq!(
            resolve_chat_endpoint("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            resolve_chat_endpoint("http://localhost:8000/v1/chat/completions"),
            "http://localhost:8000/v1/chat/completions"
        );
    }

    #[test]
    fn test_preview_cuts_long_bodies_on_char_boundaries() {
        assert_eq!(preview("  quota exceeded \n"), "quota exceeded");
        let long = "é".repeat(ERROR_BODY_PREVIEW + 5);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), ERROR_BODY_PREVIEW + 3);
    }

    #[test]
    fn test_parse_string_content() {
        let body: ChatResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {"role": "assistant", "content": "  fn factorial() {}\n"},
                "finish_reason": "stop"
            }],
            "usage": {"total_tokens": 12}
        }))
        .unwrap();

        assert_eq!(parse_choice(body).unwrap(), "fn factorial() {}");
    }

    #[test]
    fn test_parse_content_parts() {
        let body: ChatResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {"content": [
                    {"type": "text", "text": "PLAN "},
                    {"type": "text", "text": "COMPLETE"}
                ]},
                "finish_reason": null
            }]
        }))
        .unwrap();

        assert_eq!(parse_choice(body).unwrap(), "PLAN COMPLETE");
    }

    #[test]
    fn test_empty_choices_is_invalid() {
        let body: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            parse_choice(body),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_payload_includes_system_prompt_and_temperature() {
        let session = OpenAiSession {
            client: Client::new(),
            endpoint: "http://localhost/chat/completions".to_string(),
            api_key: "sk-test".to_string(),
            model: Model::new("gpt-4.1"),
            system_prompt: "You are a tester.".to_string(),
            temperature: Some(0.5),
        };

        let payload = session.payload("write tests");

        assert_eq!(payload["model"], "gpt-4.1");
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][1]["content"], "write tests");
        assert_eq!(payload["temperature"], 0.5);
    }

    #[tokio::test]
    async fn test_missing_key_fails_on_session_creation() {
        let config = FileProviderConfig {
            api_key_env: "TURNSTILE_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        let gateway = OpenAiCompatibleGateway::from_config(&config).unwrap();
        assert!(!gateway.has_credentials());

        let result = gateway
            .create_session_with_system_prompt(&Model::default(), "system")
            .await;

        match result {
            Err(GatewayError::MissingCredentials(message)) => {
                assert!(message.contains("TURNSTILE_TEST_NO_SUCH_KEY"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected missing credentials"),
        }
    }
}

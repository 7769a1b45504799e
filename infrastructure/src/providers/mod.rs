//! LLM provider adapters implementing the [`LlmGateway`](turnstile_application::LlmGateway) port

pub mod openai;

pub use openai::{OpenAiCompatibleGateway, OpenAiSession};

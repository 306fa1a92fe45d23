//! Completion-service boundary.
//!
//! A single synchronous request/response text-completion capability. The
//! concrete client targets the Anthropic Messages API; the trait seam exists
//! so the generator can be exercised with a mock provider in tests.

use crate::config::AgentConfig;
use crate::types::{AgentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Anthropic Messages API endpoint.
const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

/// Text-completion capability: one prompt in, one text out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Issue a single completion request and return the first text segment.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::CompletionError` on any service failure.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Messages API response.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

/// Anthropic Messages API client.
pub struct AnthropicClient {
    api_key: String,
    model: String,
    max_tokens: u32,
    client: Client,
}

impl AnthropicClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key
    /// * `model` - Model name (e.g. "claude-3-7-sonnet-20250219")
    /// * `max_tokens` - Output token budget per request
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            api_key,
            model,
            max_tokens,
            client: Client::new(),
        }
    }

    /// Create a client from resolved configuration.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(config.api_key.clone(), config.model.clone(), config.max_tokens)
    }
}

#[async_trait]
impl CompletionProvider for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "messages": [
                    {"role": "user", "content": prompt}
                ]
            }))
            .send()
            .await
            .map_err(|e| AgentError::completion(format!("Anthropic API error: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::completion(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AgentError::completion(format!(
                "Anthropic API error {}: {}",
                status, body
            )));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| AgentError::completion(format!("Failed to parse response: {}", e)))?;

        let text = parsed
            .content
            .first()
            .ok_or_else(|| AgentError::completion("No content in Anthropic response".to_string()))?
            .text
            .clone();

        tracing::debug!(model = %self.model, chars = text.len(), "completion received");
        Ok(text)
    }
}

//! Ollama completion client
//!
//! Talks to Ollama's non-streaming chat endpoint (`POST /api/chat`).
//! Local inference is slow, so callers are expected to pass a generous
//! timeout for generation calls.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::logging::Logger;

use super::error::{LlmError, LlmResult};
use super::traits::LlmClient;

/// Chat request body for Ollama
#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat response body from Ollama
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    #[serde(default)]
    content: String,
}

/// LLM client backed by a local Ollama server
pub struct OllamaClient {
    base_url: String,
    http: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl OllamaClient {
    /// Create a client for the given base URL (e.g. `http://ollama:11434`)
    pub fn new(base_url: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            logger,
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, prompt: &str, model: &str, timeout: Duration) -> LlmResult<String> {
        self.logger.info(&format!(
            "[OllamaClient] Requesting completion: model={}, prompt_len={}",
            model,
            prompt.len()
        ));

        let body = OllamaChatRequest {
            model,
            messages: vec![OllamaMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .http
            .post(self.chat_url())
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(timeout)
                } else {
                    LlmError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            self.logger.error(&format!(
                "[OllamaClient] Completion failed: status={}, body={}",
                status, message
            ));
            return Err(LlmError::api(status.as_u16(), message));
        }

        let reply: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        if reply.message.content.is_empty() {
            return Err(LlmError::InvalidResponse(
                "completion contained no message content".to_string(),
            ));
        }

        Ok(reply.message.content)
    }
}

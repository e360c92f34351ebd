//! Mock LLM client for testing
//!
//! Provides deterministic, scriptable completions without network
//! dependencies. Orchestrator tests use the sequence mode to script the
//! decision and synthesis phases independently.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{LlmError, LlmResult};
use super::traits::LlmClient;

/// Mock response mode
#[derive(Debug)]
enum MockMode {
    /// Return the same message for every call
    Fixed(String),
    /// Return scripted messages in order; error when exhausted
    Sequence(Mutex<VecDeque<String>>),
    /// Fail every call with a transport-style error
    Error(String),
}

/// Scriptable LLM client
pub struct MockLlm {
    mode: MockMode,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    /// Always return the same message
    pub fn fixed(message: impl Into<String>) -> Self {
        Self {
            mode: MockMode::Fixed(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Return the given messages one per call, in order
    pub fn sequence(messages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            mode: MockMode::Sequence(Mutex::new(
                messages.into_iter().map(Into::into).collect(),
            )),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            mode: MockMode::Error(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// The prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str, _model: &str, _timeout: Duration) -> LlmResult<String> {
        self.prompts.lock().push(prompt.to_string());

        match &self.mode {
            MockMode::Fixed(message) => Ok(message.clone()),
            MockMode::Sequence(queue) => queue
                .lock()
                .pop_front()
                .ok_or_else(|| LlmError::Other("mock script exhausted".to_string())),
            MockMode::Error(message) => Err(LlmError::Other(message.clone())),
        }
    }
}

//! LLM client trait definition

use std::time::Duration;

use async_trait::async_trait;

use super::error::LlmResult;

/// The outbound language-model completion seam.
///
/// One prompt in, one message out. Implementations must resolve within the
/// caller-supplied timeout and report every failure through `LlmResult`;
/// nothing may panic or escape past this boundary.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Client name for logs (e.g. "ollama", "mock")
    fn name(&self) -> &str;

    /// Request a single non-streaming completion
    async fn complete(&self, prompt: &str, model: &str, timeout: Duration) -> LlmResult<String>;
}

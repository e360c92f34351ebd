//! Remote tool invocation with result normalization
//!
//! The invoker owns the hard contract the orchestrator relies on: it never
//! returns a fault. Every failure mode (connection refused, protocol
//! error, remote exception, timeout) comes back as `ToolOutput::Error`,
//! and the connection is released on every exit path.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;

use crate::logging::Logger;
use crate::types::ToolOutput;

use super::client::McpClient;

/// The outbound tool-invocation seam.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Invoke `callable` at `endpoint` with `arguments`, bounded by
    /// `timeout`. Infallible at the type level; failures are carried in
    /// the output.
    async fn invoke(
        &self,
        endpoint: &str,
        callable: &str,
        arguments: Value,
        timeout: Duration,
    ) -> ToolOutput;
}

/// Tool invoker over MCP Streamable HTTP.
///
/// Opens a fresh connection per call; the connection's lifetime is scoped
/// exactly to the call.
pub struct McpToolInvoker {
    logger: Arc<dyn Logger>,
}

impl McpToolInvoker {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl ToolInvoker for McpToolInvoker {
    async fn invoke(
        &self,
        endpoint: &str,
        callable: &str,
        arguments: Value,
        timeout: Duration,
    ) -> ToolOutput {
        let connect = tokio::time::timeout(
            timeout,
            McpClient::connect_http(endpoint, self.logger.clone()),
        );
        let client = match connect.await {
            Ok(Ok(client)) => client,
            Ok(Err(e)) => {
                self.logger
                    .error(&format!("[McpToolInvoker] {endpoint} unreachable: {e}"));
                return ToolOutput::error(format!("failed to reach tool endpoint {endpoint}: {e}"));
            }
            Err(_) => {
                self.logger.error(&format!(
                    "[McpToolInvoker] connect to {endpoint} timed out after {timeout:?}"
                ));
                return ToolOutput::error(format!(
                    "failed to reach tool endpoint {endpoint}: connect timed out after {timeout:?}"
                ));
            }
        };

        let output = match tokio::time::timeout(timeout, client.call_tool(callable, arguments)).await
        {
            Err(_) => {
                self.logger.error(&format!(
                    "[McpToolInvoker] {callable} timed out after {timeout:?}"
                ));
                ToolOutput::error(format!("tool call '{callable}' timed out after {timeout:?}"))
            }
            Ok(Err(e)) => {
                self.logger
                    .error(&format!("[McpToolInvoker] {callable} failed: {e}"));
                ToolOutput::error(format!("tool call '{callable}' failed: {e}"))
            }
            Ok(Ok(result)) => {
                let (structured, text, is_error) = split_call_result(result);
                normalize(structured, text, is_error)
            }
        };

        if let Err(e) = client.close().await {
            self.logger
                .warn(&format!("[McpToolInvoker] close failed for {endpoint}: {e}"));
        }

        output
    }
}

/// Pull the three payload channels out of an rmcp result: the structured
/// payload, the joined text content, and the remote error flag.
fn split_call_result(result: CallToolResult) -> (Option<Value>, Option<String>, bool) {
    let is_error = result.is_error.unwrap_or(false);

    let text = {
        let joined = result
            .content
            .iter()
            .filter_map(|c| match &c.raw {
                RawContent::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    };

    (result.structured_content, text, is_error)
}

/// Normalize a remote response into the canonical mapping-or-error shape:
/// prefer the structured payload, fall back to text content, and wrap
/// anything that is not already a mapping under a `result` key.
fn normalize(structured: Option<Value>, text: Option<String>, is_error: bool) -> ToolOutput {
    if is_error {
        let message = text.unwrap_or_else(|| "tool reported an error".to_string());
        return ToolOutput::error(message);
    }

    if let Some(structured) = structured {
        return ToolOutput::wrap(structured);
    }

    match text {
        Some(text) => ToolOutput::wrap(Value::String(text)),
        None => ToolOutput::wrap(Value::Null),
    }
}

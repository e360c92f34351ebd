//! Toolgate Core
//!
//! The orchestration core of a tool-calling gateway: a user query goes to
//! a language model that decides whether a backend tool is needed, the
//! selected tool is invoked over MCP, and a second completion turns the
//! tool's output into the final natural-language answer.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use toolgate_core::{
//!     ConsoleLogger, GatewayConfig, McpToolInvoker, OllamaClient, Orchestrator,
//! };
//!
//! let config = GatewayConfig::load(GatewayConfig::user_path())?;
//! let logger = Arc::new(ConsoleLogger::new());
//!
//! let orchestrator = Orchestrator::new(
//!     &config,
//!     Arc::new(OllamaClient::new(&config.ollama_url, logger.clone())),
//!     Arc::new(McpToolInvoker::new(logger.clone())),
//!     logger,
//! )?;
//!
//! let answer = orchestrator.handle("What's the weather in Paris?").await;
//! ```

pub mod config;
pub mod decision;
pub mod llm;
pub mod logging;
pub mod mcp;
pub mod orchestrator;
pub mod prompts;
pub mod throttle;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use types::{ToolDecision, ToolOutput};

pub use tools::{CallableTable, ToolEndpoint, ToolId, ToolRegistry};

pub use decision::{Route, DecisionParseError};

pub use llm::{LlmClient, LlmError, LlmResult, MockLlm, OllamaClient};

pub use mcp::{McpClient, McpError, McpResult, McpToolInvoker, ToolInvoker};

pub use logging::{ConsoleLogger, Logger, NoOpLogger, SharedLogger};

pub use config::{ConfigError, ConfigResult, GatewayConfig, ToolServerConfig};

pub use throttle::RateGate;

pub use orchestrator::{
    Orchestrator, QueryOutcome, FALLBACK_LLM_UNAVAILABLE, FALLBACK_TOOL_UNAVAILABLE,
    FALLBACK_UNPARSEABLE,
};

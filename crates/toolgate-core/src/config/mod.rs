//! Gateway configuration (YAML)
//!
//! Supports a user-level config file (~/.config/toolgate/config.yaml);
//! a missing file yields the reference deployment defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tools::{ToolEndpoint, ToolId, ToolRegistry};

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unknown tool in server table: {0}")]
    UnknownTool(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// One tool server entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolServerConfig {
    /// Streamable-HTTP MCP endpoint URL
    pub url: String,
    /// Minimum milliseconds between calls, for rate-limited back ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_interval_ms: Option<u64>,
}

impl ToolServerConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            min_interval_ms: None,
        }
    }
}

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Model identifier passed to the completion endpoint
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the Ollama server
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Timeout for language-model completion calls, in seconds.
    /// Local inference is slow; this bound is deliberately generous.
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,

    /// Timeout for tool invocations, in seconds
    #[serde(default = "default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,

    /// Tool servers, keyed by logical tool name
    #[serde(default = "default_servers")]
    pub servers: BTreeMap<String, ToolServerConfig>,
}

fn default_model() -> String {
    "qwen3:4b".to_string()
}

fn default_ollama_url() -> String {
    "http://ollama:11434".to_string()
}

fn default_llm_timeout_secs() -> u64 {
    120
}

fn default_tool_timeout_secs() -> u64 {
    15
}

fn default_servers() -> BTreeMap<String, ToolServerConfig> {
    let mut servers = BTreeMap::new();
    servers.insert(
        "weather".to_string(),
        ToolServerConfig::new("http://weather-mcp:50053/mcp"),
    );
    servers.insert(
        "geocoding".to_string(),
        ToolServerConfig {
            url: "http://geocoding-mcp:50054/mcp".to_string(),
            min_interval_ms: Some(1000),
        },
    );
    servers.insert(
        "datetime".to_string(),
        ToolServerConfig::new("http://datetime-mcp:50051/mcp"),
    );
    servers.insert(
        "search".to_string(),
        ToolServerConfig::new("http://ddgs-mcp:50052/mcp"),
    );
    servers
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            ollama_url: default_ollama_url(),
            llm_timeout_secs: default_llm_timeout_secs(),
            tool_timeout_secs: default_tool_timeout_secs(),
            servers: default_servers(),
        }
    }
}

impl GatewayConfig {
    /// Load config from a YAML file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// The user-level config file path (~/.config/toolgate/config.yaml)
    pub fn user_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
        config_dir.join("toolgate").join("config.yaml")
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }

    /// Build the immutable tool registry from the server table.
    ///
    /// Server keys must be logical tool names; anything else is a
    /// configuration error, surfaced at start-up rather than at dispatch.
    pub fn registry(&self) -> ConfigResult<ToolRegistry> {
        let mut endpoints = std::collections::HashMap::new();
        for (name, server) in &self.servers {
            let tool = ToolId::parse(name).ok_or_else(|| ConfigError::UnknownTool(name.clone()))?;
            let mut endpoint = ToolEndpoint::new(server.url.clone());
            if let Some(ms) = server.min_interval_ms {
                endpoint = endpoint.with_min_interval(Duration::from_millis(ms));
            }
            endpoints.insert(tool, endpoint);
        }
        Ok(ToolRegistry::new(endpoints))
    }
}

//! Tool registry and callable translation table
//!
//! Two separate mappings live here:
//! - `ToolRegistry`: logical tool -> remote endpoint (where to connect)
//! - `CallableTable`: logical tool -> remote callable name (what to invoke)
//!
//! The names are allowed to diverge (logical `datetime` invokes
//! `get_current_datetime_tool`), so the translation is explicit
//! configuration data rather than a string convention.

use std::collections::HashMap;
use std::time::Duration;

use super::id::ToolId;

/// One registered tool back end
#[derive(Debug, Clone)]
pub struct ToolEndpoint {
    /// Streamable-HTTP MCP endpoint, e.g. `http://weather-mcp:50053/mcp`
    pub url: String,
    /// Minimum interval between calls, for back ends fronting
    /// rate-limited upstream APIs
    pub min_interval: Option<Duration>,
}

impl ToolEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            min_interval: None,
        }
    }

    /// Set a minimum pacing interval between calls
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }
}

/// Immutable mapping from logical tool to its remote endpoint.
///
/// Built once at start-up; exposes no mutation operations, so sharing it
/// across concurrent requests needs no locking.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    endpoints: HashMap<ToolId, ToolEndpoint>,
}

impl ToolRegistry {
    pub fn new(endpoints: HashMap<ToolId, ToolEndpoint>) -> Self {
        Self { endpoints }
    }

    /// Look up the endpoint for a tool; `None` means the tool is not
    /// deployed and callers must branch on it explicitly.
    pub fn resolve(&self, tool: ToolId) -> Option<&ToolEndpoint> {
        self.endpoints.get(&tool)
    }

    pub fn contains(&self, tool: ToolId) -> bool {
        self.endpoints.contains_key(&tool)
    }

    /// Registered tools in stable prompt order
    pub fn tools(&self) -> impl Iterator<Item = ToolId> + '_ {
        ToolId::ALL.into_iter().filter(|t| self.contains(*t))
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl Default for ToolRegistry {
    /// The reference deployment: one MCP server per tool, addressed by
    /// compose service name.
    fn default() -> Self {
        let mut endpoints = HashMap::new();
        endpoints.insert(
            ToolId::Weather,
            ToolEndpoint::new("http://weather-mcp:50053/mcp"),
        );
        endpoints.insert(
            ToolId::Geocoding,
            // The upstream geocoding API allows one request per second.
            ToolEndpoint::new("http://geocoding-mcp:50054/mcp")
                .with_min_interval(Duration::from_secs(1)),
        );
        endpoints.insert(
            ToolId::Datetime,
            ToolEndpoint::new("http://datetime-mcp:50051/mcp"),
        );
        endpoints.insert(
            ToolId::Search,
            ToolEndpoint::new("http://ddgs-mcp:50052/mcp"),
        );
        Self::new(endpoints)
    }
}

/// Mapping from logical tool to the callable name its server exposes.
///
/// Kept separate from the endpoint registry on purpose: the decision phase
/// deals in logical names, the wire deals in callable names, and the
/// orchestrator owns the translation.
#[derive(Debug, Clone)]
pub struct CallableTable {
    callables: HashMap<ToolId, String>,
}

impl CallableTable {
    pub fn new(callables: HashMap<ToolId, String>) -> Self {
        Self { callables }
    }

    /// Resolve the remote callable name for a tool; `None` fails closed.
    pub fn resolve(&self, tool: ToolId) -> Option<&str> {
        self.callables.get(&tool).map(String::as_str)
    }

    pub fn contains(&self, tool: ToolId) -> bool {
        self.callables.contains_key(&tool)
    }
}

impl Default for CallableTable {
    fn default() -> Self {
        let mut callables = HashMap::new();
        callables.insert(ToolId::Weather, "get_weather_tool".to_string());
        callables.insert(ToolId::Geocoding, "geocode_tool".to_string());
        callables.insert(ToolId::Datetime, "get_current_datetime_tool".to_string());
        callables.insert(ToolId::Search, "web_search_tool".to_string());
        Self::new(callables)
    }
}

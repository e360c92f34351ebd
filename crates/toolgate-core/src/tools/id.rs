//! Logical tool identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of tools the gateway can route to.
///
/// Model output remains a free-form string and is validated against this
/// enum at the registry boundary; inside the gateway, tool dispatch is an
/// exhaustiveness-checked match rather than an open string map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolId {
    /// Weather lookup for a location
    Weather,
    /// Address geocoding (latitude/longitude lookup)
    Geocoding,
    /// Current date and time
    Datetime,
    /// Web search
    Search,
}

impl ToolId {
    /// Every supported tool, in prompt/display order
    pub const ALL: [ToolId; 4] = [
        ToolId::Weather,
        ToolId::Geocoding,
        ToolId::Datetime,
        ToolId::Search,
    ];

    /// The stable logical name the decision phase emits
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::Weather => "weather",
            ToolId::Geocoding => "geocoding",
            ToolId::Datetime => "datetime",
            ToolId::Search => "search",
        }
    }

    /// Parse a free-form tool name from model output.
    ///
    /// Small models sometimes echo the remote callable name, or an older
    /// alias, instead of the logical name. All known spellings are
    /// accepted; anything else is `None` and degrades to a direct answer.
    pub fn parse(name: &str) -> Option<ToolId> {
        match name.trim().to_ascii_lowercase().as_str() {
            "weather" | "get_weather" | "get_weather_tool" => Some(ToolId::Weather),
            "geocoding" | "geocode" | "geocode_tool" => Some(ToolId::Geocoding),
            "datetime" | "get_current_datetime" | "get_current_datetime_tool" => {
                Some(ToolId::Datetime)
            }
            "search" | "web_search" | "search_web" | "web_search_tool" | "ddgs" => {
                Some(ToolId::Search)
            }
            _ => None,
        }
    }

    /// Human-readable server title used in the decision prompt
    pub fn title(&self) -> &'static str {
        match self {
            ToolId::Weather => "Weather Server",
            ToolId::Geocoding => "Geocoding Server",
            ToolId::Datetime => "Datetime Server",
            ToolId::Search => "Search Server",
        }
    }

    /// The argument shape documented in the decision prompt
    pub fn argument_hint(&self) -> &'static str {
        match self {
            ToolId::Weather => r#"{"location": "string"}"#,
            ToolId::Geocoding => r#"{"address": "string"}"#,
            ToolId::Datetime => r#"{}"#,
            ToolId::Search => r#"{"query": "string", "max_results": "int (optional)"}"#,
        }
    }

    /// A worked example decision for this tool.
    ///
    /// Load-bearing for small models: without concrete few-shot examples
    /// they rarely emit the schema reliably.
    pub fn example_decision(&self) -> &'static str {
        match self {
            ToolId::Weather => {
                r#"{"tool_required": true, "tool_name": "weather", "arguments": {"location": "Paris"}, "final_answer": null}"#
            }
            ToolId::Geocoding => {
                r#"{"tool_required": true, "tool_name": "geocoding", "arguments": {"address": "Chicago"}, "final_answer": null}"#
            }
            ToolId::Datetime => {
                r#"{"tool_required": true, "tool_name": "datetime", "arguments": {}, "final_answer": null}"#
            }
            ToolId::Search => {
                r#"{"tool_required": true, "tool_name": "search", "arguments": {"query": "news of the day"}, "final_answer": null}"#
            }
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

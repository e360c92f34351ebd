//! Decision-phase types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured output of the decision phase.
///
/// The language model is asked to emit exactly this shape as strict JSON.
/// Small local models frequently miss that bar, so raw model text goes
/// through `decision::repair` before being parsed into this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDecision {
    /// Whether answering the query requires a tool call
    pub tool_required: bool,
    /// Logical name of the requested tool (e.g. "weather"), if any
    #[serde(default)]
    pub tool_name: Option<String>,
    /// Tool-specific arguments; empty when the tool takes none
    #[serde(default)]
    pub arguments: Map<String, Value>,
    /// Direct answer, populated only when no tool is required
    #[serde(default)]
    pub final_answer: Option<String>,
}

impl ToolDecision {
    /// Create a direct-answer decision
    pub fn direct(answer: impl Into<String>) -> Self {
        Self {
            tool_required: false,
            tool_name: None,
            arguments: Map::new(),
            final_answer: Some(answer.into()),
        }
    }

    /// Create a tool-call decision
    pub fn tool(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            tool_required: true,
            tool_name: Some(name.into()),
            arguments,
            final_answer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_decision() {
        let raw = r#"{"tool_required": true, "tool_name": "weather", "arguments": {"location": "Paris"}, "final_answer": null}"#;
        let decision: ToolDecision = serde_json::from_str(raw).expect("should parse");

        assert!(decision.tool_required);
        assert_eq!(decision.tool_name.as_deref(), Some("weather"));
        assert_eq!(decision.arguments.get("location"), Some(&json!("Paris")));
        assert!(decision.final_answer.is_none());
    }

    #[test]
    fn test_optional_fields_default() {
        let decision: ToolDecision =
            serde_json::from_str(r#"{"tool_required": false}"#).expect("should parse");

        assert!(!decision.tool_required);
        assert!(decision.tool_name.is_none());
        assert!(decision.arguments.is_empty());
        assert!(decision.final_answer.is_none());
    }

    #[test]
    fn test_tool_required_is_mandatory() {
        // An object without tool_required is not a decision at all.
        let result = serde_json::from_str::<ToolDecision>(r#"{"tool_name": "weather"}"#);
        assert!(result.is_err());
    }
}

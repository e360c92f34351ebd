//! Structural parsing of repaired decision text

use thiserror::Error;

use super::repair::repair;
use crate::types::ToolDecision;

/// Failure to turn model output into a `ToolDecision`, after repair
#[derive(Error, Debug)]
pub enum DecisionParseError {
    #[error("model output is not a decision object: {0}")]
    Malformed(String),
}

/// Parse raw model text into a `ToolDecision`.
///
/// Applies the repair pipeline first; the structural parse itself is
/// strict. Callers convert the error into a direct-answer response rather
/// than failing the request.
pub fn parse(raw: &str) -> Result<ToolDecision, DecisionParseError> {
    let cleaned = repair(raw);
    serde_json::from_str(&cleaned).map_err(|e| DecisionParseError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_well_formed_decision() {
        let raw = r#"{"tool_required": true, "tool_name": "weather", "arguments": {"location": "Paris"}, "final_answer": null}"#;
        let decision = parse(raw).expect("should parse");
        assert!(decision.tool_required);
        assert_eq!(decision.tool_name.as_deref(), Some("weather"));
        assert_eq!(decision.arguments.get("location"), Some(&json!("Paris")));
    }

    #[test]
    fn test_parse_recovers_truncated_decision() {
        // One unbalanced brace: repair closes it, parse succeeds.
        let raw = r#"{"tool_required": true, "tool_name": "datetime", "arguments": {}, "final_answer": null"#;
        let decision = parse(raw).expect("repair should make this parseable");
        assert_eq!(decision.tool_name.as_deref(), Some("datetime"));
    }

    #[test]
    fn test_parse_recovers_chatty_preamble() {
        let raw = "Sure, here's my decision:\n{\"tool_required\": false, \"tool_name\": null, \"arguments\": {}, \"final_answer\": \"It depends.\"}";
        let decision = parse(raw).expect("should parse");
        assert_eq!(decision.final_answer.as_deref(), Some("It depends."));
    }

    #[test]
    fn test_parse_failure_carries_serde_message() {
        let err = parse("total nonsense with no braces").expect_err("must fail");
        let DecisionParseError::Malformed(message) = err;
        assert!(!message.is_empty());
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let raw = r#"{"tool_required": "yes"}"#;
        assert!(parse(raw).is_err());
    }
}

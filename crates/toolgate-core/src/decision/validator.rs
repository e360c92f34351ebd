//! Tool-decision validation
//!
//! The validator is the safety net between the model's free-form output
//! and the dispatch machinery: it is a total function, so the orchestrator
//! can always proceed to a textual answer even when the model hallucinates
//! a tool name.

use serde_json::{Map, Value};

use crate::tools::{ToolId, ToolRegistry};
use crate::types::ToolDecision;

/// Fallback answer when the model requested a tool the registry does not
/// know.
pub const FALLBACK_INVALID_TOOL: &str = "Invalid tool selected; answering directly.";

/// Fallback answer when no tool was required but the model supplied no
/// direct answer either.
pub const FALLBACK_NO_ANSWER: &str = "No specific answer available.";

/// A validated decision: either a direct answer or a dispatchable tool
/// call. Exactly one of the two holds, by construction, and a direct
/// answer is always non-empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Answer the user without any tool call
    Direct { answer: String },
    /// Invoke a registered tool with the given arguments
    Tool {
        tool: ToolId,
        arguments: Map<String, Value>,
    },
}

/// Check the parsed decision against the registry. Never fails: an
/// unresolvable tool request degrades to a direct answer with a fixed
/// fallback string.
pub fn validate(decision: ToolDecision, registry: &ToolRegistry) -> Route {
    if decision.tool_required {
        let resolved = decision
            .tool_name
            .as_deref()
            .and_then(ToolId::parse)
            .filter(|tool| registry.contains(*tool));

        return match resolved {
            Some(tool) => Route::Tool {
                tool,
                arguments: decision.arguments,
            },
            None => Route::Direct {
                answer: FALLBACK_INVALID_TOOL.to_string(),
            },
        };
    }

    let answer = decision
        .final_answer
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_NO_ANSWER.to_string());

    Route::Direct { answer }
}

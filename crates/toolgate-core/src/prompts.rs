//! Prompt builders for the two LLM phases
//!
//! The decision prompt's tool table is generated from the registry and the
//! callable table, so the prompt can never drift from what the gateway can
//! actually dispatch.

use std::fmt::Write;

use crate::tools::{CallableTable, ToolId, ToolRegistry};

/// Build the decision prompt for a user query.
///
/// Lists every tool that is both registered and callable, with its logical
/// name, remote callable, argument shape, and a worked example. The
/// examples matter: small models need concrete few-shot output to emit the
/// schema reliably.
pub fn decision_prompt(
    user_query: &str,
    registry: &ToolRegistry,
    callables: &CallableTable,
) -> String {
    let tools: Vec<ToolId> = registry
        .tools()
        .filter(|tool| callables.contains(*tool))
        .collect();

    let mut prompt = String::from(
        "You are an assistant that decides whether a user query requires calling a \
         backend tool or can be answered directly.\n\n\
         IMPORTANT:\n\
         - The tool name you output MUST be one of the logical names listed below.\n\n\
         Available servers and their tools:\n\n",
    );

    for (index, tool) in tools.iter().enumerate() {
        let callable = callables.resolve(*tool).unwrap_or_default();
        let _ = write!(
            prompt,
            "{}. {} ({})\n   - tool: {}\n   - args: {}\n\n",
            index + 1,
            tool.title(),
            tool,
            callable,
            tool.argument_hint(),
        );
    }

    let names: Vec<&str> = tools.iter().map(ToolId::as_str).collect();
    let _ = write!(
        prompt,
        "Your output MUST be strict JSON:\n\
         {{\"tool_required\": true/false, \"tool_name\": \"{}\", \"arguments\": {{}}, \"final_answer\": \"answer or null\"}}\n\n\
         Examples:\n",
        names.join("/"),
    );

    for tool in &tools {
        let _ = writeln!(prompt, "{}: {}", tool.title(), tool.example_decision());
    }

    let _ = write!(prompt, "\nNow process this user query:\n{user_query}");
    prompt
}

/// Build the synthesis prompt that turns a tool payload into the final
/// natural-language answer. The payload text is embedded unchanged.
pub fn synthesis_prompt(user_query: &str, tool: ToolId, tool_payload: &str) -> String {
    format!(
        "The user asked: {user_query}\n\n\
         The tool '{tool}' returned this data:\n\
         {tool_payload}\n\n\
         Please convert this into a natural-language answer suitable for the user."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolOutput;
    use serde_json::json;
    use std::collections::HashMap;
    use crate::tools::ToolEndpoint;

    #[test]
    fn test_decision_prompt_embeds_query_verbatim() {
        let prompt = decision_prompt(
            "What's the weather in Paris?",
            &ToolRegistry::default(),
            &CallableTable::default(),
        );
        assert!(prompt.contains("What's the weather in Paris?"));
    }

    #[test]
    fn test_decision_prompt_stays_in_lockstep_with_registry() {
        // Every registered+callable tool must appear in the prompt under
        // both its logical name and its remote callable name.
        let registry = ToolRegistry::default();
        let callables = CallableTable::default();
        let prompt = decision_prompt("anything", &registry, &callables);

        for tool in registry.tools() {
            assert!(
                prompt.contains(tool.as_str()),
                "prompt missing logical name {tool}"
            );
            let callable = callables.resolve(tool).expect("callable registered");
            assert!(
                prompt.contains(callable),
                "prompt missing callable {callable}"
            );
            assert!(
                prompt.contains(tool.example_decision()),
                "prompt missing example for {tool}"
            );
        }
    }

    #[test]
    fn test_decision_prompt_omits_undeployed_tools() {
        let mut endpoints = HashMap::new();
        endpoints.insert(
            ToolId::Weather,
            ToolEndpoint::new("http://weather-mcp:50053/mcp"),
        );
        let registry = ToolRegistry::new(endpoints);
        let prompt = decision_prompt("anything", &registry, &CallableTable::default());

        assert!(prompt.contains("get_weather_tool"));
        assert!(!prompt.contains("geocode_tool"));
        assert!(!prompt.contains("get_current_datetime_tool"));
    }

    #[test]
    fn test_synthesis_prompt_keeps_payload_content() {
        let output = ToolOutput::wrap(json!({"temperature": 21, "condition": "clear"}));
        let prompt = synthesis_prompt("Weather in Paris?", ToolId::Weather, &output.render());

        assert!(prompt.contains("temperature"));
        assert!(prompt.contains("21"));
        assert!(prompt.contains("condition"));
        assert!(prompt.contains("Weather in Paris?"));
        assert!(prompt.contains("'weather'"));
    }

    #[test]
    fn test_synthesis_prompt_passes_string_payload_through() {
        let prompt = synthesis_prompt("When is it?", ToolId::Datetime, "2026-08-06T12:00:00Z");
        assert!(prompt.contains("2026-08-06T12:00:00Z"));
    }
}

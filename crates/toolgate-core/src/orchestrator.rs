//! The control loop: decision call, optional tool call, synthesis call
//!
//! One orchestrator serves one request to completion; all per-request
//! state lives on the stack of `process`. The registry, callable table,
//! and rate gates are immutable after construction, so a single
//! orchestrator can be shared across concurrent requests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::config::{ConfigError, GatewayConfig};
use crate::decision::{self, Route};
use crate::llm::LlmClient;
use crate::logging::Logger;
use crate::mcp::ToolInvoker;
use crate::prompts;
use crate::throttle::RateGate;
use crate::tools::{CallableTable, ToolId, ToolRegistry};
use crate::types::ToolOutput;

/// Answer when the decision text cannot be parsed even after repair.
pub const FALLBACK_UNPARSEABLE: &str = "Sorry, I could not understand the request.";

/// Answer when a validated tool has no callable or endpoint entry.
pub const FALLBACK_TOOL_UNAVAILABLE: &str = "Sorry, the requested tool is not available.";

/// Answer when a completion call itself fails; the one condition with no
/// graceful text to fall back on.
pub const FALLBACK_LLM_UNAVAILABLE: &str =
    "Sorry, the language model is not responding right now.";

/// The outcome of one request: the answer, plus the raw tool output for
/// observability when a tool ran.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub answer: String,
    pub tool_output: Option<ToolOutput>,
}

impl QueryOutcome {
    fn direct(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            tool_output: None,
        }
    }
}

/// Orchestrates the two-phase conversation protocol around an optional
/// tool invocation.
pub struct Orchestrator {
    llm: Arc<dyn LlmClient>,
    invoker: Arc<dyn ToolInvoker>,
    registry: ToolRegistry,
    callables: CallableTable,
    gates: HashMap<ToolId, RateGate>,
    model: String,
    llm_timeout: Duration,
    tool_timeout: Duration,
    logger: Arc<dyn Logger>,
}

impl Orchestrator {
    /// Build an orchestrator from configuration and collaborators.
    pub fn new(
        config: &GatewayConfig,
        llm: Arc<dyn LlmClient>,
        invoker: Arc<dyn ToolInvoker>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, ConfigError> {
        let registry = config.registry()?;

        let gates = ToolId::ALL
            .into_iter()
            .filter_map(|tool| {
                let interval = registry.resolve(tool)?.min_interval?;
                Some((tool, RateGate::new(interval)))
            })
            .collect();

        Ok(Self {
            llm,
            invoker,
            registry,
            callables: CallableTable::default(),
            gates,
            model: config.model.clone(),
            llm_timeout: config.llm_timeout(),
            tool_timeout: config.tool_timeout(),
            logger,
        })
    }

    /// Replace the callable translation table.
    pub fn with_callables(mut self, callables: CallableTable) -> Self {
        self.callables = callables;
        self
    }

    /// Process a user query and return only the answer text.
    pub async fn handle(&self, user_query: &str) -> String {
        self.process(user_query).await.answer
    }

    /// Process a user query through the decision, tool, and synthesis
    /// phases. Infallible: every failure mode maps to answer text.
    pub async fn process(&self, user_query: &str) -> QueryOutcome {
        self.logger
            .info(&format!("[Orchestrator] New request: {user_query}"));

        // Decision phase
        let decision_prompt = prompts::decision_prompt(user_query, &self.registry, &self.callables);
        let raw = match self
            .llm
            .complete(&decision_prompt, &self.model, self.llm_timeout)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                self.logger
                    .error(&format!("[Orchestrator] Decision call failed: {e}"));
                return QueryOutcome::direct(FALLBACK_LLM_UNAVAILABLE);
            }
        };
        self.logger
            .debug(&format!("[Orchestrator] Raw decision: {raw}"));

        let decision = match decision::parse(&raw) {
            Ok(decision) => decision,
            Err(e) => {
                self.logger
                    .error(&format!("[Orchestrator] Decision unparseable: {e}"));
                return QueryOutcome::direct(FALLBACK_UNPARSEABLE);
            }
        };

        let (tool, arguments) = match decision::validate(decision, &self.registry) {
            Route::Direct { answer } => return QueryOutcome::direct(answer),
            Route::Tool { tool, arguments } => (tool, arguments),
        };

        // Tool phase: translate the logical name, then invoke.
        let Some(callable) = self.callables.resolve(tool) else {
            self.logger
                .warn(&format!("[Orchestrator] No callable mapping for {tool}"));
            return QueryOutcome::direct(FALLBACK_TOOL_UNAVAILABLE);
        };
        let Some(endpoint) = self.registry.resolve(tool) else {
            self.logger
                .warn(&format!("[Orchestrator] No endpoint for {tool}"));
            return QueryOutcome::direct(FALLBACK_TOOL_UNAVAILABLE);
        };

        if let Some(gate) = self.gates.get(&tool) {
            gate.pace().await;
        }

        self.logger.info(&format!(
            "[Orchestrator] Invoking {tool} ({callable}) at {}",
            endpoint.url
        ));
        let output = self
            .invoker
            .invoke(
                &endpoint.url,
                callable,
                Value::Object(arguments),
                self.tool_timeout,
            )
            .await;

        // Synthesis phase: narrate the payload, or the failure, either way.
        let synthesis_prompt = prompts::synthesis_prompt(user_query, tool, &output.render());
        match self
            .llm
            .complete(&synthesis_prompt, &self.model, self.llm_timeout)
            .await
        {
            Ok(answer) => QueryOutcome {
                answer,
                tool_output: Some(output),
            },
            Err(e) => {
                self.logger
                    .error(&format!("[Orchestrator] Synthesis call failed: {e}"));
                QueryOutcome {
                    answer: FALLBACK_LLM_UNAVAILABLE.to_string(),
                    tool_output: Some(output),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::FALLBACK_INVALID_TOOL;
    use crate::llm::MockLlm;
    use crate::logging::NoOpLogger;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    /// Records every invocation and replies with a canned output.
    struct RecordingInvoker {
        calls: Mutex<Vec<(String, String, Value)>>,
        reply: ToolOutput,
    }

    impl RecordingInvoker {
        fn replying(reply: ToolOutput) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn calls(&self) -> Vec<(String, String, Value)> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl ToolInvoker for RecordingInvoker {
        async fn invoke(
            &self,
            endpoint: &str,
            callable: &str,
            arguments: Value,
            _timeout: Duration,
        ) -> ToolOutput {
            self.calls
                .lock()
                .push((endpoint.to_string(), callable.to_string(), arguments));
            self.reply.clone()
        }
    }

    fn orchestrator(llm: Arc<MockLlm>, invoker: Arc<RecordingInvoker>) -> Orchestrator {
        Orchestrator::new(
            &GatewayConfig::default(),
            llm,
            invoker,
            Arc::new(NoOpLogger::new()),
        )
        .expect("default config is valid")
    }

    fn weather_payload() -> ToolOutput {
        ToolOutput::wrap(json!({"temperature": 21, "condition": "clear"}))
    }

    const WEATHER_DECISION: &str = r#"{"tool_required": true, "tool_name": "weather", "arguments": {"location": "Paris"}, "final_answer": null}"#;

    #[tokio::test]
    async fn test_direct_answer_is_returned_unmodified() {
        let llm = Arc::new(MockLlm::fixed(
            r#"{"tool_required": false, "tool_name": null, "arguments": {}, "final_answer": "Paris is the capital of France."}"#,
        ));
        let invoker = RecordingInvoker::replying(weather_payload());
        let orch = orchestrator(llm, invoker.clone());

        let answer = orch.handle("What is the capital of France?").await;

        assert_eq!(answer, "Paris is the capital of France.");
        assert!(invoker.calls().is_empty(), "no tool call expected");
    }

    #[tokio::test]
    async fn test_weather_decision_invokes_mapped_callable() {
        let llm = Arc::new(MockLlm::sequence([
            WEATHER_DECISION,
            "It is 21 degrees and clear in Paris.",
        ]));
        let invoker = RecordingInvoker::replying(weather_payload());
        let orch = orchestrator(llm, invoker.clone());

        let outcome = orch.process("What's the weather in Paris?").await;

        let calls = invoker.calls();
        assert_eq!(calls.len(), 1);
        let (endpoint, callable, arguments) = &calls[0];
        assert_eq!(endpoint, "http://weather-mcp:50053/mcp");
        assert_eq!(callable, "get_weather_tool");
        assert_eq!(arguments, &json!({"location": "Paris"}));

        assert_eq!(outcome.answer, "It is 21 degrees and clear in Paris.");
        assert_eq!(outcome.tool_output, Some(weather_payload()));
    }

    #[tokio::test]
    async fn test_synthesis_prompt_carries_tool_payload() {
        let llm = Arc::new(MockLlm::sequence([WEATHER_DECISION, "narrated answer"]));
        let invoker = RecordingInvoker::replying(weather_payload());
        let orch = orchestrator(llm.clone(), invoker);

        let _ = orch.handle("What's the weather in Paris?").await;

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("temperature"));
        assert!(prompts[1].contains("21"));
        assert!(prompts[1].contains("What's the weather in Paris?"));
    }

    #[tokio::test]
    async fn test_tool_fault_is_narrated_not_echoed() {
        let raw_fault = "failed to reach tool endpoint http://weather-mcp:50053/mcp: connection refused";
        let llm = Arc::new(MockLlm::sequence([
            WEATHER_DECISION,
            "I could not reach the weather service, sorry.",
        ]));
        let invoker = RecordingInvoker::replying(ToolOutput::error(raw_fault));
        let orch = orchestrator(llm.clone(), invoker);

        let answer = orch.handle("What's the weather in Paris?").await;

        assert!(!answer.is_empty());
        assert_ne!(answer, raw_fault);
        assert_eq!(answer, "I could not reach the weather service, sorry.");

        // The failure is passed to synthesis as the tool output.
        let prompts = llm.prompts();
        assert!(prompts[1].contains("connection refused"));
    }

    #[tokio::test]
    async fn test_unparseable_decision_yields_fixed_apology() {
        let llm = Arc::new(MockLlm::fixed("I think you want the weather!"));
        let invoker = RecordingInvoker::replying(weather_payload());
        let orch = orchestrator(llm, invoker.clone());

        let answer = orch.handle("What's the weather?").await;

        assert_eq!(answer, FALLBACK_UNPARSEABLE);
        assert!(invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool_degrades_to_direct_answer() {
        let llm = Arc::new(MockLlm::fixed(
            r#"{"tool_required": true, "tool_name": "calculator", "arguments": {}, "final_answer": null}"#,
        ));
        let invoker = RecordingInvoker::replying(weather_payload());
        let orch = orchestrator(llm, invoker.clone());

        let answer = orch.handle("What is 2+2?").await;

        assert_eq!(answer, FALLBACK_INVALID_TOOL);
        assert!(invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_decision_transport_failure_is_fatal_with_fixed_answer() {
        let llm = Arc::new(MockLlm::error("model host unreachable"));
        let invoker = RecordingInvoker::replying(weather_payload());
        let orch = orchestrator(llm, invoker.clone());

        let answer = orch.handle("Anything").await;

        assert_eq!(answer, FALLBACK_LLM_UNAVAILABLE);
        assert!(invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_synthesis_transport_failure_falls_back_after_tool_call() {
        // Decision succeeds, tool runs, then the script runs dry and the
        // synthesis call errors.
        let llm = Arc::new(MockLlm::sequence([WEATHER_DECISION]));
        let invoker = RecordingInvoker::replying(weather_payload());
        let orch = orchestrator(llm, invoker.clone());

        let outcome = orch.process("What's the weather in Paris?").await;

        assert_eq!(invoker.calls().len(), 1, "tool call already happened");
        assert_eq!(outcome.answer, FALLBACK_LLM_UNAVAILABLE);
        assert_eq!(outcome.tool_output, Some(weather_payload()));
    }

    #[tokio::test]
    async fn test_empty_final_answer_gets_fallback_text() {
        let llm = Arc::new(MockLlm::fixed(
            r#"{"tool_required": false, "tool_name": null, "arguments": {}, "final_answer": null}"#,
        ));
        let invoker = RecordingInvoker::replying(weather_payload());
        let orch = orchestrator(llm, invoker);

        let answer = orch.handle("Hmm").await;
        assert!(!answer.is_empty());
    }

    #[tokio::test]
    async fn test_datetime_tool_invoked_with_empty_arguments() {
        let llm = Arc::new(MockLlm::sequence([
            r#"{"tool_required": true, "tool_name": "datetime", "arguments": {}, "final_answer": null}"#,
            "It is noon UTC.",
        ]));
        let invoker = RecordingInvoker::replying(ToolOutput::wrap(json!({
            "iso": "2026-08-06T12:00:00Z"
        })));
        let orch = orchestrator(llm, invoker.clone());

        let answer = orch.handle("What time is it?").await;

        let calls = invoker.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "get_current_datetime_tool");
        assert_eq!(calls[0].2, json!({}));
        assert_eq!(answer, "It is noon UTC.");
    }
}

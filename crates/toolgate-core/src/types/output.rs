//! Canonical tool-output shape

use serde_json::{json, Map, Value};

/// Normalized result of a remote tool invocation.
///
/// Every tool back end ultimately produces either a string-keyed payload or
/// an error record. Bare scalars and lists are wrapped under a `result` key
/// so downstream consumers always see a mapping at the top level.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// The tool's structured payload
    Payload(Map<String, Value>),
    /// A human-readable failure description
    Error(String),
}

impl ToolOutput {
    /// Create an error output
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Wrap an arbitrary JSON value into the canonical mapping shape.
    ///
    /// Objects pass through; anything else lands under a `result` key.
    pub fn wrap(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Payload(map),
            other => {
                let mut map = Map::new();
                map.insert("result".to_string(), other);
                Self::Payload(map)
            }
        }
    }

    /// Whether this output represents a failed invocation
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The canonical JSON value of this output.
    ///
    /// Errors take the `{"error": ..., "results": []}` form.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Payload(map) => Value::Object(map.clone()),
            Self::Error(message) => json!({ "error": message, "results": [] }),
        }
    }

    /// Serialize for embedding into a synthesis prompt.
    pub fn render(&self) -> String {
        self.to_value().to_string()
    }
}

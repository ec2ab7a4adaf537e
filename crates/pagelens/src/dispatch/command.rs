//! Command envelope

use serde::Deserialize;
use serde_json::{Map, Value};

/// A declarative command: an action tag plus its payload.
///
/// Identity is optional; the dispatcher assigns one when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct Command {
    /// Caller-supplied identity, echoed in the response
    #[serde(default)]
    pub id: Option<Value>,

    /// Action tag from the closed command surface
    pub action: String,

    /// Remaining payload fields, passed to the executor
    #[serde(flatten)]
    pub args: Map<String, Value>,
}

impl Command {
    /// Create a command with no payload
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            id: None,
            action: action.into(),
            args: Map::new(),
        }
    }

    /// Set the command identity
    #[must_use]
    pub fn with_id(mut self, id: Value) -> Self {
        self.id = Some(id);
        self
    }

    /// Add one payload field
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.args.insert(key.into(), value);
        self
    }
}

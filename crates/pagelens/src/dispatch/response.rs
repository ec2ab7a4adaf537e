//! Response envelope

use serde::Serialize;
use serde_json::Value;

use crate::actions::{ActionError, ErrorCode, ErrorContext};

/// A structured, self-describing command response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Echoed or assigned command identity
    pub id: Value,

    /// Whether the command succeeded
    pub success: bool,

    /// Result payload on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Human-readable failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Taxonomy code of the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,

    /// Structured failure context for automated recovery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_context: Option<ErrorContext>,

    /// Recovery suggestions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl Response {
    /// Build a success response
    #[must_use]
    pub fn ok(id: Value, data: Value) -> Self {
        Self {
            id,
            success: true,
            data: Some(data),
            error: None,
            error_code: None,
            error_context: None,
            suggestions: Vec::new(),
        }
    }

    /// Build a failure response from a shaped error
    #[must_use]
    pub fn from_action_error(id: Value, error: ActionError) -> Self {
        Self {
            id,
            success: false,
            data: None,
            error: Some(error.message),
            error_code: Some(error.code),
            error_context: error.context,
            suggestions: error.suggestions,
        }
    }

    /// Build a plain failure response without structured context
    #[must_use]
    pub fn failure(id: Value, message: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            data: None,
            error: Some(message.into()),
            error_code: None,
            error_context: None,
            suggestions: Vec::new(),
        }
    }
}

//! Structured action errors
//!
//! Every executor failure carries a code from the closed taxonomy, a
//! human-readable message, optional structured context sufficient for
//! automated recovery, and suggestion strings. The dispatcher renders
//! these into the response envelope; nothing throws across the boundary.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// The closed error-code set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Selector resolved to nothing
    ElementNotFound,
    /// Type mismatch for the requested action
    ElementNotCompatible,
    /// Post-condition predicate false at timeout
    VerificationFailed,
    /// The `wait` action did not reach its target state
    Timeout,
    /// Mutually exclusive or ill-formed arguments
    InvalidParameters,
}

impl ErrorCode {
    /// The wire token for this code
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ElementNotFound => "ELEMENT_NOT_FOUND",
            Self::ElementNotCompatible => "ELEMENT_NOT_COMPATIBLE",
            Self::VerificationFailed => "VERIFICATION_FAILED",
            Self::Timeout => "TIMEOUT",
            Self::InvalidParameters => "INVALID_PARAMETERS",
        }
    }
}

/// Attachment/visibility/enablement of an element at failure time
#[derive(Debug, Clone, Serialize)]
pub struct ElementState {
    /// Still in the document
    pub attached: bool,
    /// Observable per the visibility rules
    pub visible: bool,
    /// Not disabled
    pub enabled: bool,
}

/// A nearby interactive element offered as a recovery target
#[derive(Debug, Clone, Serialize)]
pub struct NearbyElement {
    /// Ref usable as a selector
    #[serde(rename = "ref")]
    pub element_ref: String,
    /// Role name
    pub role: String,
    /// Short accessible name
    pub name: String,
}

/// Structured failure context
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    /// The selector that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    /// What the action required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_type: Option<String>,

    /// What the element actually is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_type: Option<String>,

    /// Element state at failure time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_state: Option<ElementState>,

    /// Actions the element does support
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available_actions: Vec<String>,

    /// Selectors resembling the one that failed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub similar_selectors: Vec<String>,

    /// Interactive elements present on the page
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nearby_elements: Vec<NearbyElement>,

    /// Expected value of a failed verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,

    /// Actual value of a failed verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,

    /// Last observed state of a timed-out wait
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_state: Option<String>,

    /// Argument names that conflict
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicting_fields: Vec<String>,
}

/// A shaped executor failure
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ActionError {
    /// Taxonomy code
    pub code: ErrorCode,
    /// Human-readable description
    pub message: String,
    /// Structured context, when available
    pub context: Option<ErrorContext>,
    /// Recovery suggestions
    pub suggestions: Vec<String>,
}

impl ActionError {
    /// Create an error with no context
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Attach structured context
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Append a suggestion string
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Ill-formed arguments
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParameters, message)
    }

    /// Mutually exclusive arguments
    #[must_use]
    pub fn conflicting_params(message: impl Into<String>, fields: &[&str]) -> Self {
        Self::new(ErrorCode::InvalidParameters, message).with_context(ErrorContext {
            conflicting_fields: fields.iter().map(|f| (*f).to_string()).collect(),
            ..ErrorContext::default()
        })
    }

    /// Post-condition failed at verifier timeout
    #[must_use]
    pub fn verification_failed(
        message: impl Into<String>,
        expected: Value,
        actual: Value,
    ) -> Self {
        Self::new(ErrorCode::VerificationFailed, message)
            .with_context(ErrorContext {
                expected: Some(expected),
                actual: Some(actual),
                ..ErrorContext::default()
            })
            .with_suggestion("Take a fresh snapshot and retry the action")
    }

    /// The `wait` action timed out
    #[must_use]
    pub fn timeout(message: impl Into<String>, last_state: impl Into<String>) -> Self {
        Self::new(ErrorCode::Timeout, message).with_context(ErrorContext {
            last_state: Some(last_state.into()),
            ..ErrorContext::default()
        })
    }
}

//! Clear action

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::capability::{ElementKind, classify};
use super::waiter::{PollOutcome, WaitConfig, poll_until};
use super::{Action, ActionError, ActionResult, hints, parse_input, resolve_required};
use crate::dom::{Event, EventType};
use crate::page::PageState;

/// Empties an input or textarea
pub struct ClearAction;

/// Input parameters for `clear`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,

    /// Verifier timeout override in milliseconds
    pub timeout: Option<u64>,
}

impl ClearAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ClearAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for ClearAction {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn description(&self) -> &'static str {
        "Empty an input or textarea value, dispatching input and change."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: ClearInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;

        let classification = classify(&page.document, node);
        if !matches!(
            classification.kind,
            ElementKind::TextInput | ElementKind::TextArea
        ) {
            return Err(hints::element_not_compatible(
                &page.document,
                node,
                &input.selector,
                "input or textarea",
                &classification,
            ));
        }

        page.document.set_value(node, "");
        page.document.dispatch(Event::new(EventType::Input, node));
        page.document.dispatch(Event::new(EventType::Change, node));

        let config = WaitConfig::verifier().with_timeout_ms(input.timeout);
        let doc = &page.document;
        let outcome = poll_until(&config, || {
            let current = doc.value(node).unwrap_or_default();
            if current.is_empty() {
                PollOutcome::ok()
            } else {
                PollOutcome::mismatch("value not empty", json!(""), json!(current))
            }
        })
        .await;

        if !outcome.success {
            return Err(ActionError::verification_failed(
                format!("Clear did not empty '{}'", input.selector),
                outcome.expected.unwrap_or(Value::Null),
                outcome.actual.unwrap_or(Value::Null),
            ));
        }

        Ok(json!({
            "message": format!("Cleared '{}'", input.selector),
        }))
    }
}

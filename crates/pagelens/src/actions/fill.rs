//! Fill action

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::capability::{ElementKind, classify};
use super::waiter::{PollOutcome, WaitConfig, poll_until};
use super::{Action, ActionError, ActionResult, hints, parse_input, resolve_required};
use crate::dom::{Event, EventType};
use crate::page::PageState;

/// Sets an input or textarea value wholesale
pub struct FillAction;

/// Input parameters for `fill`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,

    /// The value to set
    pub value: String,

    /// Verifier timeout override in milliseconds
    pub timeout: Option<u64>,
}

impl FillAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for FillAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for FillAction {
    fn name(&self) -> &'static str {
        "fill"
    }

    fn description(&self) -> &'static str {
        "Set an input or textarea value in one edit, dispatching input and change. \
         The verifier requires the value to match exactly."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: FillInput = parse_input(args)?;
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

        page.document.focus(node);
        page.document.set_value(node, input.value.clone());
        page.document.dispatch(Event::new(EventType::Input, node));
        page.document.dispatch(Event::new(EventType::Change, node));

        let config = WaitConfig::verifier().with_timeout_ms(input.timeout);
        let doc = &page.document;
        let expected = input.value.clone();
        let outcome = poll_until(&config, || {
            let current = doc.value(node).unwrap_or_default();
            if current == expected {
                PollOutcome::ok()
            } else {
                PollOutcome::mismatch(
                    "value does not match",
                    json!(expected.clone()),
                    json!(current),
                )
            }
        })
        .await;

        if !outcome.success {
            return Err(ActionError::verification_failed(
                format!("Fill did not stick on '{}'", input.selector),
                outcome.expected.unwrap_or(Value::Null),
                outcome.actual.unwrap_or(Value::Null),
            ));
        }

        Ok(json!({
            "message": format!("Filled '{}'", input.selector),
            "value": input.value,
        }))
    }
}

//! Select action

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::capability::{Capability, classify};
use super::waiter::{PollOutcome, WaitConfig, poll_until};
use super::{Action, ActionError, ActionResult, hints, parse_input, resolve_required};
use crate::dom::{Document, Event, EventType, NodeId, collapse_whitespace};
use crate::page::PageState;

/// Sets the selected options of a `<select>`
pub struct SelectAction;

/// Input parameters for `select`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,

    /// Option values to select
    #[serde(default)]
    pub values: Vec<String>,

    /// Single option value to select
    pub value: Option<String>,

    /// Verifier timeout override in milliseconds
    pub timeout: Option<u64>,
}

/// The submit value of an option: its `value` attribute, else its text
fn option_value(doc: &Document, option: NodeId) -> String {
    doc.attr(option, "value")
        .map(str::to_string)
        .unwrap_or_else(|| collapse_whitespace(&doc.text_content(option)))
}

fn options_of(doc: &Document, select: NodeId) -> Vec<NodeId> {
    doc.subtree(select)
        .into_iter()
        .filter(|&n| doc.tag(n) == Some("option"))
        .collect()
}

impl SelectAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SelectAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for SelectAction {
    fn name(&self) -> &'static str {
        "select"
    }

    fn description(&self) -> &'static str {
        "Select options of a <select> by value; every other option is deselected. \
         The verifier requires the selected set to equal the requested set."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: SelectInput = parse_input(args)?;

        let mut requested = input.values;
        if let Some(single) = input.value {
            if requested.is_empty() {
                requested.push(single);
            } else {
                return Err(ActionError::conflicting_params(
                    "Provide either 'value' or 'values', not both",
                    &["value", "values"],
                ));
            }
        }
        if requested.is_empty() {
            return Err(ActionError::invalid_params(
                "select requires 'value' or 'values'",
            ));
        }

        let node = resolve_required(page, &input.selector)?;
        let classification = classify(&page.document, node);
        if !classification.has(Capability::Selectable) {
            return Err(hints::element_not_compatible(
                &page.document,
                node,
                &input.selector,
                "select",
                &classification,
            ));
        }

        page.document.focus(node);
        let options = options_of(&page.document, node);
        for option in &options {
            let value = option_value(&page.document, *option);
            page.document
                .set_selected(*option, requested.contains(&value));
        }
        page.document.dispatch(Event::new(EventType::Change, node));

        let mut want: Vec<String> = requested.clone();
        want.sort();
        want.dedup();

        let config = WaitConfig::verifier().with_timeout_ms(input.timeout);
        let doc = &page.document;
        let outcome = poll_until(&config, || {
            let mut have: Vec<String> = options_of(doc, node)
                .into_iter()
                .filter(|&opt| doc.is_selected(opt))
                .map(|opt| option_value(doc, opt))
                .collect();
            have.sort();
            have.dedup();
            if have == want {
                PollOutcome::ok()
            } else {
                PollOutcome::mismatch(
                    "selected set mismatch",
                    json!(want.clone()),
                    json!(have),
                )
            }
        })
        .await;

        if !outcome.success {
            return Err(ActionError::verification_failed(
                format!("Selection on '{}' did not match", input.selector),
                outcome.expected.unwrap_or(Value::Null),
                outcome.actual.unwrap_or(Value::Null),
            ));
        }

        Ok(json!({
            "message": format!("Selected {} option(s) in '{}'", want.len(), input.selector),
            "values": want,
        }))
    }
}

//! Type action
//!
//! Synthesizes realistic text entry. Inputs and textareas receive a
//! per-character keydown/keypress/value-append/input/keyup loop with an
//! optional inter-character delay; contenteditable targets take a fast
//! path inserting the whole string as a single edit. A final `change`
//! event commits the value, and the verifier confirms the typed text
//! landed.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::time::sleep;

use super::capability::{Capability, ElementKind, classify};
use super::waiter::{PollOutcome, WaitConfig, poll_until};
use super::{Action, ActionError, ActionResult, hints, parse_input, resolve_required};
use crate::dom::{Document, Event, EventType, NodeId};
use crate::page::PageState;

/// Types text into an editable element
pub struct TypeAction;

/// Input parameters for `type`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,

    /// Text to type
    pub text: String,

    /// Clear the current value first
    #[serde(default)]
    pub clear: bool,

    /// Milliseconds between characters
    pub delay: Option<u64>,

    /// Verifier timeout override in milliseconds
    pub timeout: Option<u64>,
}

impl TypeAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TypeAction {
    fn default() -> Self {
        Self::new()
    }
}

/// Empty an editable target, dispatching input and change
pub(crate) fn clear_target(doc: &mut Document, node: NodeId, kind: ElementKind) {
    if kind == ElementKind::ContentEditable {
        doc.set_text(node, "");
    } else {
        doc.set_value(node, "");
    }
    doc.dispatch(Event::new(EventType::Input, node));
    doc.dispatch(Event::new(EventType::Change, node));
}

#[async_trait]
impl Action for TypeAction {
    fn name(&self) -> &'static str {
        "type"
    }

    fn description(&self) -> &'static str {
        "Type text into an input, textarea, or contenteditable element, \
         character by character, with optional delay and clearing."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: TypeInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;

        let classification = classify(&page.document, node);
        if !classification.has(Capability::Editable) {
            return Err(hints::element_not_compatible(
                &page.document,
                node,
                &input.selector,
                "editable",
                &classification,
            ));
        }
        let editable_text = classification.kind == ElementKind::ContentEditable;

        page.document.focus(node);
        if input.clear {
            clear_target(&mut page.document, node, classification.kind);
        }

        if editable_text {
            // Whole-string single edit
            let mut content = page.document.text_content(node);
            content.push_str(&input.text);
            page.document.set_text(node, content);
            page.document.dispatch(Event::new(EventType::Input, node));
        } else {
            let delay = input.delay.filter(|&ms| ms > 0);
            for (i, ch) in input.text.chars().enumerate() {
                if i > 0 && let Some(ms) = delay {
                    sleep(Duration::from_millis(ms)).await;
                }
                let key = ch.to_string();
                page.document
                    .dispatch(Event::new(EventType::KeyDown, node).with_key(key.clone()));
                page.document
                    .dispatch(Event::new(EventType::KeyPress, node).with_key(key.clone()));
                let mut value = page.document.value(node).unwrap_or_default();
                value.push(ch);
                page.document.set_value(node, value);
                page.document.dispatch(Event::new(EventType::Input, node));
                page.document
                    .dispatch(Event::new(EventType::KeyUp, node).with_key(key));
            }
        }
        page.document.dispatch(Event::new(EventType::Change, node));

        let config = WaitConfig::verifier().with_timeout_ms(input.timeout);
        let doc = &page.document;
        let expected = input.text.clone();
        let outcome = poll_until(&config, || {
            let current = if editable_text {
                doc.text_content(node)
            } else {
                doc.value(node).unwrap_or_default()
            };
            if current.contains(&expected) {
                PollOutcome::ok()
            } else {
                PollOutcome::mismatch(
                    "typed text not present",
                    json!(expected.clone()),
                    json!(current),
                )
            }
        })
        .await;

        if !outcome.success {
            return Err(ActionError::verification_failed(
                format!("Typed text did not appear in '{}'", input.selector),
                outcome.expected.unwrap_or(Value::Null),
                outcome.actual.unwrap_or(Value::Null),
            ));
        }

        let value = if editable_text {
            page.document.text_content(node)
        } else {
            page.document.value(node).unwrap_or_default()
        };
        Ok(json!({
            "message": format!("Typed {} characters into '{}'", input.text.chars().count(), input.selector),
            "value": value,
        }))
    }
}

//! Check and uncheck actions
//!
//! Both are click-driven: when the current state differs from the desired
//! one a click is dispatched and the default action flips the checkbox.
//! Already-satisfied states are no-ops. Radios cannot be unchecked
//! directly; they clear when a sibling in the group is checked.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::capability::{Capability, ElementKind, classify};
use super::waiter::{PollOutcome, WaitConfig, poll_until};
use super::{Action, ActionError, ActionResult, hints, parse_input, resolve_required};
use crate::dom::{Event, EventType};
use crate::page::PageState;

/// Checks a checkbox or radio
pub struct CheckAction;

/// Unchecks a checkbox
pub struct UncheckAction;

/// Input parameters for `check` and `uncheck`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,

    /// Verifier timeout override in milliseconds
    pub timeout: Option<u64>,
}

async fn set_checked_state(args: &Value, page: &mut PageState, desired: bool) -> ActionResult {
    let input: CheckInput = parse_input(args)?;
    let node = resolve_required(page, &input.selector)?;

    let classification = classify(&page.document, node);
    if !classification.has(Capability::Checkable) {
        return Err(hints::element_not_compatible(
            &page.document,
            node,
            &input.selector,
            "checkable",
            &classification,
        ));
    }
    if classification.kind == ElementKind::Radio && !desired {
        return Err(hints::element_not_compatible(
            &page.document,
            node,
            &input.selector,
            "checkbox",
            &classification,
        )
        .with_suggestion("Radios clear when another radio in the group is checked"));
    }

    if page.document.is_checked(node) != desired {
        page.document.focus(node);
        page.document.dispatch(Event::new(EventType::Click, node));
    }

    let config = WaitConfig::verifier().with_timeout_ms(input.timeout);
    let doc = &page.document;
    let outcome = poll_until(&config, || {
        let current = doc.is_checked(node);
        if current == desired {
            PollOutcome::ok()
        } else {
            PollOutcome::mismatch("checked state mismatch", json!(desired), json!(current))
        }
    })
    .await;

    if !outcome.success {
        return Err(ActionError::verification_failed(
            format!("'{}' did not reach checked={desired}", input.selector),
            outcome.expected.unwrap_or(Value::Null),
            outcome.actual.unwrap_or(Value::Null),
        ));
    }

    let verb = if desired { "Checked" } else { "Unchecked" };
    Ok(json!({
        "message": format!("{verb} '{}'", input.selector),
        "checked": desired,
    }))
}

impl CheckAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CheckAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for CheckAction {
    fn name(&self) -> &'static str {
        "check"
    }

    fn description(&self) -> &'static str {
        "Check a checkbox or radio; a no-op when already checked."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        set_checked_state(args, page, true).await
    }
}

impl UncheckAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for UncheckAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for UncheckAction {
    fn name(&self) -> &'static str {
        "uncheck"
    }

    fn description(&self) -> &'static str {
        "Uncheck a checkbox; a no-op when already unchecked."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        set_checked_state(args, page, false).await
    }
}

//! Wait action
//!
//! Polls until a selector reaches a target state (attached, detached,
//! visible, hidden, enabled) or the timeout elapses. The selector is
//! re-resolved on every poll so freshly inserted elements are seen. On
//! timeout the error reports the last observed state.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::waiter::{PollOutcome, WaitConfig, poll_until};
use super::{Action, ActionError, ActionResult, parse_input};
use crate::dom::{Document, NodeId};
use crate::page::PageState;
use crate::query;
use crate::snapshot;

/// Waits for an element state
pub struct WaitAction;

/// Input parameters for `wait`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,

    /// Target state
    #[serde(default)]
    pub state: TargetState,

    /// Timeout override in milliseconds (default 5000)
    pub timeout: Option<u64>,

    /// Poll interval override in milliseconds (default 100)
    pub interval: Option<u64>,
}

/// State a `wait` can target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    /// In the document
    Attached,
    /// Not in the document
    Detached,
    /// Attached and observable
    #[default]
    Visible,
    /// Absent or not observable
    Hidden,
    /// Attached and not disabled
    Enabled,
}

impl TargetState {
    /// Lowercase state name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attached => "attached",
            Self::Detached => "detached",
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Enabled => "enabled",
        }
    }
}

fn describe_state(doc: &Document, node: Option<NodeId>) -> String {
    match node {
        None => "detached".to_string(),
        Some(n) => {
            let visibility = if snapshot::is_visible(doc, n) {
                "visible"
            } else {
                "hidden"
            };
            let enablement = if doc.is_disabled(n) {
                "disabled"
            } else {
                "enabled"
            };
            format!("attached, {visibility}, {enablement}")
        }
    }
}

impl WaitAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for WaitAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for WaitAction {
    fn name(&self) -> &'static str {
        "wait"
    }

    fn description(&self) -> &'static str {
        "Wait until a selector is attached, detached, visible, hidden, or enabled, \
         up to a timeout."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: WaitInput = parse_input(args)?;
        let config = WaitConfig::wait_action()
            .with_timeout_ms(input.timeout)
            .with_interval_ms(input.interval);

        let doc = &page.document;
        let refs = &page.refs;
        let mut last_state = String::from("unknown");
        let outcome = poll_until(&config, || {
            let node = query::resolve_first(doc, refs, &input.selector)
                .filter(|&n| doc.is_connected(n));
            last_state = describe_state(doc, node);
            let satisfied = match input.state {
                TargetState::Attached => node.is_some(),
                TargetState::Detached => node.is_none(),
                TargetState::Visible => node.is_some_and(|n| snapshot::is_visible(doc, n)),
                TargetState::Hidden => node.is_none_or(|n| !snapshot::is_visible(doc, n)),
                TargetState::Enabled => node.is_some_and(|n| !doc.is_disabled(n)),
            };
            if satisfied {
                PollOutcome::ok()
            } else {
                PollOutcome::fail(format!("not yet {}", input.state.as_str()))
            }
        })
        .await;

        if !outcome.success {
            return Err(ActionError::timeout(
                format!(
                    "Timed out waiting for '{}' to be {}",
                    input.selector,
                    input.state.as_str()
                ),
                last_state,
            ));
        }

        Ok(json!({
            "message": format!("'{}' is {}", input.selector, input.state.as_str()),
            "state": input.state.as_str(),
        }))
    }
}

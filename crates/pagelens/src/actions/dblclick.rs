//! Double-click action

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::click::{ModifierKey, combine_modifiers};
use super::{Action, ActionResult, parse_input, resolve_required};
use crate::dom::{Event, EventType};
use crate::page::PageState;

/// Dispatches a single bubbling `dblclick` event
pub struct DblClickAction;

/// Input parameters for `dblclick`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DblClickInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,

    /// Modifier keys held during the double-click
    #[serde(default)]
    pub modifiers: Vec<ModifierKey>,
}

impl DblClickAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DblClickAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for DblClickAction {
    fn name(&self) -> &'static str {
        "dblclick"
    }

    fn description(&self) -> &'static str {
        "Double-click an element (one bubbling dblclick event)."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: DblClickInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;

        if page.document.is_focusable(node) {
            page.document.focus(node);
        }
        page.document.dispatch(
            Event::new(EventType::DblClick, node)
                .with_detail(2)
                .with_modifiers(combine_modifiers(&input.modifiers)),
        );

        let connected = page.document.is_connected(node);
        Ok(json!({
            "message": format!("Double-clicked '{}'", input.selector),
            "connected": connected,
        }))
    }
}

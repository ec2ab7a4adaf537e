//! Hover action

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Action, ActionResult, parse_input, resolve_required};
use crate::dom::{Event, EventType};
use crate::page::PageState;

/// Dispatches mouseenter and mouseover on an element
pub struct HoverAction;

/// Input parameters for `hover`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,
}

impl HoverAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HoverAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for HoverAction {
    fn name(&self) -> &'static str {
        "hover"
    }

    fn description(&self) -> &'static str {
        "Hover an element: dispatches mouseenter, then a bubbling mouseover."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: HoverInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;

        page.document.dispatch(Event::new(EventType::MouseEnter, node));
        page.document.dispatch(Event::new(EventType::MouseOver, node));

        Ok(json!({
            "message": format!("Hovering '{}'", input.selector),
        }))
    }
}

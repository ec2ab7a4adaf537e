//! Scroll-into-view action

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Action, ActionResult, parse_input, resolve_required};
use crate::dom::{Event, EventType};
use crate::page::PageState;

/// Scrolls the window so an element's box is in view (block alignment)
pub struct ScrollIntoViewAction;

/// Input parameters for `scrollIntoView`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollIntoViewInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,
}

impl ScrollIntoViewAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ScrollIntoViewAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for ScrollIntoViewAction {
    fn name(&self) -> &'static str {
        "scrollIntoView"
    }

    fn description(&self) -> &'static str {
        "Scroll the window until the element's box starts at the top of the viewport."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: ScrollIntoViewInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;

        page.document.scroll_into_view(node);
        let root = page.document.root();
        page.document.dispatch(Event::new(EventType::Scroll, root));

        let PageState {
            document, overlay, ..
        } = page;
        overlay.sync(document);

        let (x, y) = page.document.scroll_position();
        Ok(json!({
            "message": format!("Scrolled '{}' into view", input.selector),
            "x": x,
            "y": y,
        }))
    }
}

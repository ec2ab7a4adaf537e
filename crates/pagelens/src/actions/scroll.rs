//! Scroll action
//!
//! Two mutually exclusive modes: absolute `{x, y}` deltas, or relative
//! `{direction, amount}`. Scrolls the selected element's own viewport, or
//! the window when no selector is given.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Action, ActionError, ActionResult, parse_input, resolve_required};
use crate::dom::{Event, EventType};
use crate::page::PageState;

/// Default relative scroll step in pixels
const DEFAULT_AMOUNT: f64 = 300.0;

/// Scrolls the window or an element
pub struct ScrollAction;

/// Input parameters for `scroll`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollInput {
    /// Optional element to scroll; the window when absent
    pub selector: Option<String>,

    /// Horizontal delta in pixels
    pub x: Option<f64>,

    /// Vertical delta in pixels
    pub y: Option<f64>,

    /// Relative direction
    pub direction: Option<ScrollDirection>,

    /// Relative step in pixels
    pub amount: Option<f64>,
}

/// Relative scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// Negative y
    Up,
    /// Positive y
    Down,
    /// Negative x
    Left,
    /// Positive x
    Right,
}

impl ScrollAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ScrollAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for ScrollAction {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn description(&self) -> &'static str {
        "Scroll the window or an element, either by absolute x/y deltas or by \
         direction and amount. The two modes are mutually exclusive."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: ScrollInput = parse_input(args)?;

        let absolute = input.x.is_some() || input.y.is_some();
        let relative = input.direction.is_some() || input.amount.is_some();
        if absolute && relative {
            return Err(ActionError::conflicting_params(
                "scroll accepts either x/y deltas or direction/amount, not both",
                &["x", "y", "direction", "amount"],
            ));
        }
        if !absolute && !relative {
            return Err(ActionError::invalid_params(
                "scroll requires x/y deltas or direction/amount",
            ));
        }

        let (dx, dy) = if absolute {
            (input.x.unwrap_or(0.0), input.y.unwrap_or(0.0))
        } else {
            let Some(direction) = input.direction else {
                return Err(ActionError::invalid_params("amount requires a direction"));
            };
            let amount = input.amount.unwrap_or(DEFAULT_AMOUNT);
            match direction {
                ScrollDirection::Up => (0.0, -amount),
                ScrollDirection::Down => (0.0, amount),
                ScrollDirection::Left => (-amount, 0.0),
                ScrollDirection::Right => (amount, 0.0),
            }
        };

        let position = match &input.selector {
            Some(selector) => {
                let node = resolve_required(page, selector)?;
                page.document.element_scroll_by(node, dx, dy);
                page.document.dispatch(Event::new(EventType::Scroll, node));
                let el = page.document.element(node);
                el.map_or((0.0, 0.0), |el| (el.scroll_x, el.scroll_y))
            }
            None => {
                page.document.scroll_by(dx, dy);
                let root = page.document.root();
                page.document.dispatch(Event::new(EventType::Scroll, root));
                page.document.scroll_position()
            }
        };

        let PageState {
            document, overlay, ..
        } = page;
        overlay.sync(document);

        Ok(json!({
            "message": "Scrolled",
            "x": position.0,
            "y": position.1,
        }))
    }
}

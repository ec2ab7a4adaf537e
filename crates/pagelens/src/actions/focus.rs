//! Focus and blur actions
//!
//! Both resolve their selector and then never fail: focusing something
//! unfocusable simply reports `focused: false`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Action, ActionResult, parse_input, resolve_required};
use crate::page::PageState;

/// Moves focus to an element
pub struct FocusAction;

/// Removes focus from an element
pub struct BlurAction;

/// Input parameters for `focus` and `blur`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,
}

impl FocusAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for FocusAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for FocusAction {
    fn name(&self) -> &'static str {
        "focus"
    }

    fn description(&self) -> &'static str {
        "Focus an element if it is focusable; reports the outcome, never fails."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: FocusInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;
        let focused = page.document.focus(node);
        Ok(json!({
            "message": format!("Focus '{}'", input.selector),
            "focused": focused,
        }))
    }
}

impl BlurAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for BlurAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for BlurAction {
    fn name(&self) -> &'static str {
        "blur"
    }

    fn description(&self) -> &'static str {
        "Blur an element if it currently holds focus; never fails."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: FocusInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;
        let blurred = page.document.blur(node);
        Ok(json!({
            "message": format!("Blur '{}'", input.selector),
            "blurred": blurred,
        }))
    }
}

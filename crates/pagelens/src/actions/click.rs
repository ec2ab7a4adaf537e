//! Click action

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Action, ActionError, ActionResult, parse_input, resolve_required};
use crate::dom::{Event, EventType, Modifiers};
use crate::page::PageState;

/// Clicks an element with a realistic mousedown/mouseup/click sequence
pub struct ClickAction;

/// Input parameters for `click`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,

    /// Mouse button to use
    #[serde(default)]
    pub button: MouseButton,

    /// Number of click sequences to dispatch
    #[serde(default = "default_click_count")]
    pub click_count: u32,

    /// Modifier keys held during the click
    #[serde(default)]
    pub modifiers: Vec<ModifierKey>,
}

fn default_click_count() -> u32 {
    1
}

/// Mouse button for click sequences
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Button code 0
    #[default]
    Left,
    /// Button code 1
    Middle,
    /// Button code 2
    Right,
}

impl MouseButton {
    /// DOM button code
    #[must_use]
    pub fn code(self) -> i16 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }
}

/// Modifier keys accepted on mouse actions
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum ModifierKey {
    /// Alt/Option
    Alt,
    /// Control
    Control,
    /// Meta/Command
    Meta,
    /// Shift
    Shift,
}

/// Fold modifier keys into event flags
#[must_use]
pub(crate) fn combine_modifiers(modifiers: &[ModifierKey]) -> Modifiers {
    let mut flags = Modifiers::none();
    for modifier in modifiers {
        match modifier {
            ModifierKey::Alt => flags.alt = true,
            ModifierKey::Control => flags.ctrl = true,
            ModifierKey::Meta => flags.meta = true,
            ModifierKey::Shift => flags.shift = true,
        }
    }
    flags
}

impl ClickAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ClickAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for ClickAction {
    fn name(&self) -> &'static str {
        "click"
    }

    fn description(&self) -> &'static str {
        "Click an element. Supports left/middle/right button, multiple clicks, \
         and modifier keys. The element may remove itself; that is reported, not failed."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: ClickInput = parse_input(args)?;
        if input.click_count == 0 || input.click_count > 3 {
            return Err(ActionError::invalid_params(
                "clickCount must be between 1 and 3",
            ));
        }
        let node = resolve_required(page, &input.selector)?;

        if page.document.is_focusable(node) {
            page.document.focus(node);
        }

        let modifiers = combine_modifiers(&input.modifiers);
        let button = input.button.code();
        for i in 0..input.click_count {
            let detail = i + 1;
            for event_type in [EventType::MouseDown, EventType::MouseUp, EventType::Click] {
                page.document.dispatch(
                    Event::new(event_type, node)
                        .with_button(button)
                        .with_detail(detail)
                        .with_modifiers(modifiers),
                );
            }
        }

        // A click is allowed to remove its own target
        let connected = page.document.is_connected(node);
        Ok(json!({
            "message": format!("Clicked '{}'", input.selector),
            "connected": connected,
        }))
    }
}

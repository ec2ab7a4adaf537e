//! Keyboard actions: press, keyDown, keyUp
//!
//! `press` accepts combination strings like `Control+a` or `Shift+Tab`;
//! named keys normalize to their DOM key values. The target is the
//! resolved selector, else the active element, else the body.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Action, ActionResult, parse_input, resolve_required};
use crate::dom::{Event, EventType, Modifiers, NodeId};
use crate::page::PageState;

/// Dispatches a full keydown/keypress/keyup sequence
pub struct PressAction;

/// Dispatches a single keydown
pub struct KeyDownAction;

/// Dispatches a single keyup
pub struct KeyUpAction;

/// Input parameters for the keyboard actions
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInput {
    /// Key or combination, e.g. `Enter`, `a`, `Control+Shift+k`
    pub key: String,

    /// Optional target; defaults to the active element or body
    pub selector: Option<String>,
}

/// Split a combination string into modifier flags and the final key
#[must_use]
pub(crate) fn parse_combo(combo: &str) -> (Modifiers, String) {
    let mut modifiers = Modifiers::none();
    if combo.len() <= 1 || !combo.contains('+') {
        return (modifiers, normalize_key(combo));
    }

    let parts: Vec<&str> = combo.split('+').filter(|p| !p.is_empty()).collect();
    let Some((last, mods)) = parts.split_last() else {
        return (modifiers, normalize_key(combo));
    };
    for part in mods {
        match part.to_ascii_lowercase().as_str() {
            "control" | "ctrl" => modifiers.ctrl = true,
            "alt" | "option" => modifiers.alt = true,
            "meta" | "cmd" | "command" => modifiers.meta = true,
            "shift" => modifiers.shift = true,
            _ => {}
        }
    }
    (modifiers, normalize_key(last))
}

fn normalize_key(key: &str) -> String {
    let named = match key.to_ascii_lowercase().as_str() {
        "enter" | "return" => "Enter",
        "tab" => "Tab",
        "escape" | "esc" => "Escape",
        "backspace" => "Backspace",
        "delete" | "del" => "Delete",
        "arrowup" | "up" => "ArrowUp",
        "arrowdown" | "down" => "ArrowDown",
        "arrowleft" | "left" => "ArrowLeft",
        "arrowright" | "right" => "ArrowRight",
        "home" => "Home",
        "end" => "End",
        "pageup" => "PageUp",
        "pagedown" => "PageDown",
        "space" => " ",
        _ => return key.to_string(),
    };
    named.to_string()
}

/// Resolve the key target: selector, active element, or body
fn key_target(page: &mut PageState, selector: Option<&str>) -> Result<NodeId, super::ActionError> {
    match selector {
        Some(s) => resolve_required(page, s),
        None => Ok(page
            .document
            .active_element()
            .or_else(|| page.document.body())
            .unwrap_or_else(|| page.document.root())),
    }
}

impl PressAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PressAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for PressAction {
    fn name(&self) -> &'static str {
        "press"
    }

    fn description(&self) -> &'static str {
        "Press a key or combination: keydown, keypress for printable keys, keyup."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: KeyInput = parse_input(args)?;
        let target = key_target(page, input.selector.as_deref())?;
        let (modifiers, key) = parse_combo(&input.key);

        page.document.dispatch(
            Event::new(EventType::KeyDown, target)
                .with_key(key.clone())
                .with_modifiers(modifiers),
        );
        if key.chars().count() == 1 {
            page.document.dispatch(
                Event::new(EventType::KeyPress, target)
                    .with_key(key.clone())
                    .with_modifiers(modifiers),
            );
        }
        page.document.dispatch(
            Event::new(EventType::KeyUp, target)
                .with_key(key.clone())
                .with_modifiers(modifiers),
        );

        Ok(json!({
            "message": format!("Pressed '{}'", input.key),
            "key": key,
        }))
    }
}

impl KeyDownAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for KeyDownAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for KeyDownAction {
    fn name(&self) -> &'static str {
        "keyDown"
    }

    fn description(&self) -> &'static str {
        "Dispatch a single keydown event."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: KeyInput = parse_input(args)?;
        let target = key_target(page, input.selector.as_deref())?;
        let (modifiers, key) = parse_combo(&input.key);
        page.document.dispatch(
            Event::new(EventType::KeyDown, target)
                .with_key(key.clone())
                .with_modifiers(modifiers),
        );
        Ok(json!({ "message": format!("Key down '{key}'"), "key": key }))
    }
}

impl KeyUpAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for KeyUpAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for KeyUpAction {
    fn name(&self) -> &'static str {
        "keyUp"
    }

    fn description(&self) -> &'static str {
        "Dispatch a single keyup event."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: KeyInput = parse_input(args)?;
        let target = key_target(page, input.selector.as_deref())?;
        let (modifiers, key) = parse_combo(&input.key);
        page.document.dispatch(
            Event::new(EventType::KeyUp, target)
                .with_key(key.clone())
                .with_modifiers(modifiers),
        );
        Ok(json!({ "message": format!("Key up '{key}'"), "key": key }))
    }
}

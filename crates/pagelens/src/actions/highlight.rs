//! Highlight actions

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Action, ActionError, ActionResult};
use crate::page::PageState;

/// Installs the highlight overlay for the last snapshot's refs
pub struct HighlightAction;

/// Removes the highlight overlay
pub struct ClearHighlightAction;

impl HighlightAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HighlightAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for HighlightAction {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn description(&self) -> &'static str {
        "Overlay border boxes and numeric labels on the refs of the last snapshot."
    }

    async fn execute(&self, _args: &Value, page: &mut PageState) -> ActionResult {
        let PageState {
            document,
            refs,
            last_snapshot,
            overlay,
        } = page;
        let Some(snapshot) = last_snapshot.as_ref() else {
            return Err(ActionError::invalid_params(
                "highlight requires a prior snapshot",
            )
            .with_suggestion("Run the snapshot command first"));
        };
        let highlighted = overlay.show(document, refs, snapshot);
        Ok(json!({
            "message": format!("Highlighted {highlighted} element(s)"),
            "highlighted": highlighted,
        }))
    }
}

impl ClearHighlightAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ClearHighlightAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for ClearHighlightAction {
    fn name(&self) -> &'static str {
        "clearHighlight"
    }

    fn description(&self) -> &'static str {
        "Remove the highlight overlay; safe to call when none is installed."
    }

    async fn execute(&self, _args: &Value, page: &mut PageState) -> ActionResult {
        let PageState {
            document, overlay, ..
        } = page;
        overlay.clear(document);
        Ok(json!({ "message": "Highlights cleared" }))
    }
}

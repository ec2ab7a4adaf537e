//! Snapshot and extract actions

use async_trait::async_trait;
use serde_json::Value;

use super::{Action, ActionResult, parse_input, resolve_required};
use crate::page::PageState;
use crate::snapshot::{SnapshotMode, SnapshotOptions, create_snapshot};

/// Captures a snapshot in any mode
pub struct SnapshotAction;

/// Captures an extract-mode snapshot
pub struct ExtractAction;

async fn run_snapshot(
    args: &Value,
    page: &mut PageState,
    forced_mode: Option<SnapshotMode>,
) -> ActionResult {
    let mut options: SnapshotOptions = parse_input(args)?;
    if let Some(mode) = forced_mode {
        options.mode = mode;
    }

    let root = match &options.root {
        Some(selector) => Some(resolve_required(page, selector)?),
        None => None,
    };

    let data = create_snapshot(&page.document, &mut page.refs, root, &options);
    let rendered = serde_json::to_value(&data).unwrap_or(Value::Null);
    page.last_snapshot = Some(data);
    Ok(rendered)
}

impl SnapshotAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SnapshotAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for SnapshotAction {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn description(&self) -> &'static str {
        "Capture a semantic snapshot (interactive, outline, content, or extract mode) \
         and refresh all element refs."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        run_snapshot(args, page, None).await
    }
}

impl ExtractAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ExtractAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for ExtractAction {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn description(&self) -> &'static str {
        "Serialize readable content of the page (or a subtree) as markdown or \
         cleaned HTML."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        run_snapshot(args, page, Some(SnapshotMode::Extract)).await
    }
}

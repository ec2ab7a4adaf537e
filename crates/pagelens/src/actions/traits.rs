//! Action trait definitions

use async_trait::async_trait;
use serde_json::Value;

use super::ActionError;
use crate::page::PageState;

/// Result type for action execution: structured data or a shaped error
pub type ActionResult = Result<Value, ActionError>;

/// One command executor.
///
/// Implementations resolve their selector, validate capability, synthesize
/// the event sequence, and verify the post-condition before returning.
#[async_trait]
pub trait Action: Send + Sync {
    /// The action tag this executor handles
    fn name(&self) -> &'static str;

    /// One-line description for hosts enumerating the command surface
    fn description(&self) -> &'static str;

    /// Execute against the page state
    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult;
}

//! Action executors
//!
//! One executor per command tag. Every executor follows the same contract:
//! resolve the selector (failing with `ELEMENT_NOT_FOUND` and recovery
//! hints), validate capability (failing with `ELEMENT_NOT_COMPATIBLE`),
//! synthesize a realistic event sequence, and verify the post-condition
//! through the assertion waiter (failing with `VERIFICATION_FAILED`).

// Interaction actions
mod check;
mod clear;
mod click;
mod dblclick;
mod fill;
mod focus;
mod hover;
mod keys;
mod scroll;
mod scroll_into_view;
mod select_option;
mod typing;

// Introspection actions
mod inspect;
mod snapshot;

// Control actions
mod evaluate;
mod highlight;
mod validate;
mod wait_for;

// Framework
mod capability;
mod error;
mod hints;
mod registry;
mod traits;
mod waiter;

#[cfg(test)]
mod tests;

// Re-export interaction actions
pub use check::{CheckAction, UncheckAction};
pub use clear::ClearAction;
pub use click::{ClickAction, MouseButton};
pub use dblclick::DblClickAction;
pub use fill::FillAction;
pub use focus::{BlurAction, FocusAction};
pub use hover::HoverAction;
pub use keys::{KeyDownAction, KeyUpAction, PressAction};
pub use scroll::{ScrollAction, ScrollDirection};
pub use scroll_into_view::ScrollIntoViewAction;
pub use select_option::SelectAction;
pub use typing::TypeAction;

// Re-export introspection actions
pub use inspect::{
    GetAttributeAction, GetBoundingBoxAction, GetPropertyAction, GetTextAction, IsCheckedAction,
    IsEnabledAction, IsVisibleAction, QuerySelectorAction, QuerySelectorAllAction,
};
pub use snapshot::{ExtractAction, SnapshotAction};

// Re-export control actions
pub use evaluate::EvaluateAction;
pub use highlight::{ClearHighlightAction, HighlightAction};
pub use validate::{ValidateElementAction, ValidateRefsAction};
pub use wait_for::WaitAction;

// Re-export framework types
pub use capability::{Capability, Classification, ElementKind, available_actions, classify};
pub use error::{ActionError, ElementState, ErrorCode, ErrorContext, NearbyElement};
pub use registry::{ActionRegistry, register_all_actions};
pub use traits::{Action, ActionResult};
pub use waiter::{PollOutcome, WaitConfig, poll_until};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::dom::NodeId;
use crate::page::PageState;
use crate::query;

/// Deserialize command args into an executor's input struct
pub(crate) fn parse_input<T: DeserializeOwned>(args: &Value) -> Result<T, ActionError> {
    serde_json::from_value(args.clone()).map_err(|e| ActionError::invalid_params(e.to_string()))
}

/// Resolve a selector to an attached element, shaping the not-found error
/// with similarity and nearby hints
pub(crate) fn resolve_required(
    page: &mut PageState,
    selector: &str,
) -> Result<NodeId, ActionError> {
    match query::resolve_first(&page.document, &page.refs, selector) {
        Some(node) if page.document.is_connected(node) => Ok(node),
        _ => Err(hints::element_not_found(page, selector)),
    }
}

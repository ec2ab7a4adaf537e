//! Validation actions
//!
//! `validateElement` inspects an element without mutating it, reporting
//! its role, kind, capabilities, and state against an optional capability
//! requirement. `validateRefs` classifies a list of refs into the ones
//! that still resolve and the ones that no longer do, with a per-ref
//! reason.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::capability::{Capability, available_actions, classify};
use super::{Action, ActionError, ActionResult, parse_input, resolve_required};
use crate::page::PageState;
use crate::snapshot::{self, ElementRef};

/// Reason a ref failed validation: never resolved
const REASON_NOT_FOUND: &str = "Ref not found";

/// Reason a ref failed validation: resolved but detached
const REASON_REMOVED: &str = "Element has been removed from the DOM";

/// Inspects an element against a capability requirement
pub struct ValidateElementAction;

/// Classifies refs into valid and invalid
pub struct ValidateRefsAction;

/// Input parameters for `validateElement`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateElementInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,

    /// Capability requirement: clickable, editable, checkable, hoverable,
    /// selectable, or focusable
    pub requirement: Option<String>,
}

/// Input parameters for `validateRefs`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRefsInput {
    /// Refs to classify
    pub refs: Vec<String>,
}

/// Report for one validated element
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    compatible: bool,
    actual_role: String,
    actual_type: String,
    capabilities: Vec<String>,
    state: ValidationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

#[derive(Debug, Serialize)]
struct ValidationState {
    visible: bool,
    enabled: bool,
    attached: bool,
}

impl ValidateElementAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ValidateElementAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for ValidateElementAction {
    fn name(&self) -> &'static str {
        "validateElement"
    }

    fn description(&self) -> &'static str {
        "Inspect an element without mutating it: role, kind, capabilities, state, \
         and compatibility with an optional requirement."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: ValidateElementInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;

        let classification = classify(&page.document, node);
        let role = snapshot::resolve_role(&page.document, node);

        let (compatible, suggestion) = match &input.requirement {
            None => (true, None),
            Some(requirement) => {
                let Some(capability) = Capability::parse(requirement) else {
                    return Err(ActionError::invalid_params(format!(
                        "Unknown requirement '{requirement}'"
                    )));
                };
                let ok = classification.has(capability);
                let suggestion = (!ok).then(|| {
                    format!(
                        "Element is a {}; supported actions: {}",
                        classification.kind.as_str(),
                        available_actions(&classification).join(", ")
                    )
                });
                (ok, suggestion)
            }
        };

        let report = ValidationReport {
            compatible,
            actual_role: role.as_str().to_string(),
            actual_type: classification.kind.as_str().to_string(),
            capabilities: classification.capability_names(),
            state: ValidationState {
                visible: snapshot::is_visible(&page.document, node),
                enabled: !page.document.is_disabled(node),
                attached: page.document.is_connected(node),
            },
            suggestion,
        };
        Ok(serde_json::to_value(report).unwrap_or(Value::Null))
    }
}

impl ValidateRefsAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ValidateRefsAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for ValidateRefsAction {
    fn name(&self) -> &'static str {
        "validateRefs"
    }

    fn description(&self) -> &'static str {
        "Partition a list of refs into valid (still resolving to attached elements) \
         and invalid, with a per-ref reason."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: ValidateRefsInput = parse_input(args)?;

        let mut valid: Vec<String> = Vec::new();
        let mut invalid: Vec<Value> = Vec::new();
        for raw in &input.refs {
            let resolved = ElementRef::parse(raw).ok().and_then(|r| page.refs.get(r));
            match resolved {
                Some(node) if page.document.is_connected(node) => valid.push(raw.clone()),
                Some(_) => invalid.push(json!({ "ref": raw, "reason": REASON_REMOVED })),
                None => invalid.push(json!({ "ref": raw, "reason": REASON_NOT_FOUND })),
            }
        }

        Ok(json!({ "valid": valid, "invalid": invalid }))
    }
}

//! Introspection actions
//!
//! The read-only command surface: querySelector/querySelectorAll, getText,
//! getAttribute, getProperty, getBoundingBox, isVisible, isEnabled, and
//! isChecked. Absence is an error only where the contract resolves a
//! single required element; querySelector reports `found: false` instead.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::capability::{Capability, classify};
use super::evaluate::element_property;
use super::{Action, ActionResult, hints, parse_input, resolve_required};
use crate::dom::{NodeId, collapse_whitespace};
use crate::page::PageState;
use crate::query;
use crate::snapshot::{self, LabelMap};

/// Finds the first element matching a selector
pub struct QuerySelectorAction;

/// Finds every element matching a selector
pub struct QuerySelectorAllAction;

/// Reads collapsed text content
pub struct GetTextAction;

/// Reads an attribute
pub struct GetAttributeAction;

/// Reads an IDL property
pub struct GetPropertyAction;

/// Reads the client rectangle
pub struct GetBoundingBoxAction;

/// Reports visibility
pub struct IsVisibleAction;

/// Reports enablement
pub struct IsEnabledAction;

/// Reports checkedness
pub struct IsCheckedAction;

/// Input carrying just a selector
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,
}

/// Input carrying a selector and a name
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedInput {
    /// Ref, XPath, or CSS selector
    pub selector: String,

    /// Attribute or property name
    pub name: String,
}

/// Describe an element for query results, assigning it a ref
fn describe(page: &mut PageState, node: NodeId) -> Value {
    let labels = LabelMap::build(&page.document);
    let info = snapshot::resolve_role_info(&page.document, node, &labels);
    let handle = page.refs.generate(node);
    json!({
        "ref": handle.to_string(),
        "tag": page.document.tag(node),
        "role": info.role.as_str(),
        "name": info.name,
    })
}

macro_rules! plain_ctor {
    ($ty:ident) => {
        impl $ty {
            /// Create the action
            #[must_use]
            pub const fn new() -> Self {
                Self
            }
        }
        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

plain_ctor!(QuerySelectorAction);
plain_ctor!(QuerySelectorAllAction);
plain_ctor!(GetTextAction);
plain_ctor!(GetAttributeAction);
plain_ctor!(GetPropertyAction);
plain_ctor!(GetBoundingBoxAction);
plain_ctor!(IsVisibleAction);
plain_ctor!(IsEnabledAction);
plain_ctor!(IsCheckedAction);

#[async_trait]
impl Action for QuerySelectorAction {
    fn name(&self) -> &'static str {
        "querySelector"
    }

    fn description(&self) -> &'static str {
        "Find the first element matching a selector; absence is reported, not failed."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: SelectorInput = parse_input(args)?;
        let found = query::resolve_first(&page.document, &page.refs, &input.selector)
            .filter(|&n| page.document.is_connected(n));
        match found {
            Some(node) => {
                let element = describe(page, node);
                Ok(json!({ "found": true, "element": element }))
            }
            None => Ok(json!({ "found": false })),
        }
    }
}

#[async_trait]
impl Action for QuerySelectorAllAction {
    fn name(&self) -> &'static str {
        "querySelectorAll"
    }

    fn description(&self) -> &'static str {
        "Find every element matching a selector, in document order."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: SelectorInput = parse_input(args)?;
        let nodes: Vec<NodeId> = query::resolve_all(&page.document, &page.refs, &input.selector)
            .into_iter()
            .filter(|&n| page.document.is_connected(n))
            .collect();
        let elements: Vec<Value> = nodes.into_iter().map(|n| describe(page, n)).collect();
        Ok(json!({ "count": elements.len(), "elements": elements }))
    }
}

#[async_trait]
impl Action for GetTextAction {
    fn name(&self) -> &'static str {
        "getText"
    }

    fn description(&self) -> &'static str {
        "Read an element's collapsed text content."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: SelectorInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;
        let text = collapse_whitespace(&page.document.text_content(node));
        Ok(json!({ "text": text }))
    }
}

#[async_trait]
impl Action for GetAttributeAction {
    fn name(&self) -> &'static str {
        "getAttribute"
    }

    fn description(&self) -> &'static str {
        "Read an attribute value; null when the attribute is absent."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: NamedInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;
        let value = page
            .document
            .attr(node, &input.name)
            .map_or(Value::Null, |v| Value::String(v.to_string()));
        Ok(json!({ "value": value }))
    }
}

#[async_trait]
impl Action for GetPropertyAction {
    fn name(&self) -> &'static str {
        "getProperty"
    }

    fn description(&self) -> &'static str {
        "Read an IDL property (value, checked, tagName, textContent, ...); \
         null for unsupported names."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: NamedInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;
        let value = element_property(&page.document, node, &input.name).unwrap_or(Value::Null);
        Ok(json!({ "value": value }))
    }
}

#[async_trait]
impl Action for GetBoundingBoxAction {
    fn name(&self) -> &'static str {
        "getBoundingBox"
    }

    fn description(&self) -> &'static str {
        "Read the element's client rectangle, verbatim from the layout environment."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: SelectorInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;
        let rect = page.document.bounding_box(node);
        Ok(serde_json::to_value(rect).unwrap_or(Value::Null))
    }
}

#[async_trait]
impl Action for IsVisibleAction {
    fn name(&self) -> &'static str {
        "isVisible"
    }

    fn description(&self) -> &'static str {
        "Report whether the element is observable."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: SelectorInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;
        Ok(json!({ "visible": snapshot::is_visible(&page.document, node) }))
    }
}

#[async_trait]
impl Action for IsEnabledAction {
    fn name(&self) -> &'static str {
        "isEnabled"
    }

    fn description(&self) -> &'static str {
        "Report whether the element is enabled."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: SelectorInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;
        Ok(json!({ "enabled": !page.document.is_disabled(node) }))
    }
}

#[async_trait]
impl Action for IsCheckedAction {
    fn name(&self) -> &'static str {
        "isChecked"
    }

    fn description(&self) -> &'static str {
        "Report whether a checkbox or radio is checked."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: SelectorInput = parse_input(args)?;
        let node = resolve_required(page, &input.selector)?;
        let classification = classify(&page.document, node);
        if !classification.has(Capability::Checkable) {
            return Err(hints::element_not_compatible(
                &page.document,
                node,
                &input.selector,
                "checkable",
                &classification,
            ));
        }
        Ok(json!({ "checked": page.document.is_checked(node) }))
    }
}

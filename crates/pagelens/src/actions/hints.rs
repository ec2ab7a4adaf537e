//! Recovery hints for shaped errors
//!
//! When resolution or validation fails, the error is enriched before it
//! leaves the executor: selectors resembling the one that failed, the
//! interactive elements actually present (each with a fresh ref), and the
//! actions the offending element does support.

use crate::dom::{Document, NodeId, collapse_whitespace};
use crate::page::PageState;
use crate::snapshot::{self, LabelMap, RefMap};

use super::capability::{self, Classification};
use super::error::{ActionError, ElementState, ErrorCode, ErrorContext, NearbyElement};

/// Cap on similar-selector hints
const MAX_SIMILAR: usize = 3;

/// Cap on nearby-element hints
const MAX_NEARBY: usize = 5;

/// Cap on hint name length
const NAME_MAX: usize = 40;

/// Build an `ELEMENT_NOT_FOUND` error with similarity and nearby hints
pub(crate) fn element_not_found(page: &mut PageState, selector: &str) -> ActionError {
    let similar = similar_selectors(&page.document, selector);
    let nearby = nearby_interactive(&page.document, &mut page.refs);

    let mut error = ActionError::new(
        ErrorCode::ElementNotFound,
        format!("No element matches selector '{selector}'"),
    );
    if !similar.is_empty() {
        error = error.with_suggestion(format!("Did you mean: {}", similar.join(", ")));
    }
    if !nearby.is_empty() {
        error = error.with_suggestion(
            "Interactive elements are listed in errorContext.nearbyElements; \
             take a fresh snapshot for the full page",
        );
    }
    error.with_context(ErrorContext {
        selector: Some(selector.to_string()),
        similar_selectors: similar,
        nearby_elements: nearby,
        ..ErrorContext::default()
    })
}

/// Build an `ELEMENT_NOT_COMPATIBLE` error carrying the element's real
/// kind, state, and supported actions
pub(crate) fn element_not_compatible(
    doc: &Document,
    node: NodeId,
    selector: &str,
    expected: &str,
    classification: &Classification,
) -> ActionError {
    let available = capability::available_actions(classification);
    let state = ElementState {
        attached: doc.is_connected(node),
        visible: snapshot::is_visible(doc, node),
        enabled: !doc.is_disabled(node),
    };
    ActionError::new(
        ErrorCode::ElementNotCompatible,
        format!(
            "Element '{selector}' is a {} and does not support this action (requires {expected})",
            classification.kind.as_str()
        ),
    )
    .with_suggestion(format!(
        "Supported actions for this element: {}",
        available.join(", ")
    ))
    .with_context(ErrorContext {
        selector: Some(selector.to_string()),
        expected_type: Some(expected.to_string()),
        actual_type: Some(classification.kind.as_str().to_string()),
        element_state: Some(state),
        available_actions: available,
        ..ErrorContext::default()
    })
}

/// Fuzzy-match the id or class token of a failing selector against the
/// document's ids and class names, case-insensitive in both directions
pub(crate) fn similar_selectors(doc: &Document, selector: &str) -> Vec<String> {
    let needle = extract_token(selector).to_ascii_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<String> = Vec::new();
    for node in doc.all_elements() {
        let Some(el) = doc.element(node) else {
            continue;
        };
        if let Some(id) = el.id() {
            let lower = id.to_ascii_lowercase();
            if lower.contains(&needle) || needle.contains(&lower) {
                let candidate = format!("#{id}");
                if candidate != selector && !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
        for class in el.classes() {
            let lower = class.to_ascii_lowercase();
            if lower.contains(&needle) || needle.contains(&lower) {
                let candidate = format!(".{class}");
                if candidate != selector && !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
        if out.len() >= MAX_SIMILAR {
            break;
        }
    }
    out.truncate(MAX_SIMILAR);
    out
}

/// Visible interactive elements, each captured with a ref, role, and name
pub(crate) fn nearby_interactive(doc: &Document, refs: &mut RefMap) -> Vec<NearbyElement> {
    let labels = LabelMap::build(doc);
    let mut out = Vec::new();
    for node in doc.all_elements() {
        if out.len() >= MAX_NEARBY {
            break;
        }
        if !is_interactive_candidate(doc, node) {
            continue;
        }
        if !snapshot::is_visible(doc, node) {
            continue;
        }
        let info = snapshot::resolve_role_info(doc, node, &labels);
        let handle = refs.generate(node);
        let mut name = collapse_whitespace(&info.name);
        if name.len() > NAME_MAX {
            name.truncate(floor_char_boundary(&name, NAME_MAX));
        }
        out.push(NearbyElement {
            element_ref: handle.to_string(),
            role: info.role.as_str().to_string(),
            name,
        });
    }
    out
}

fn is_interactive_candidate(doc: &Document, node: NodeId) -> bool {
    let Some(el) = doc.element(node) else {
        return false;
    };
    match el.tag.as_str() {
        "button" | "textarea" | "select" => true,
        "a" => el.has_attr("href"),
        "input" => !el.is_input_of_type(&["hidden"]),
        _ => {
            matches!(el.attr("role"), Some("button" | "link")) || el.has_attr("tabindex")
        }
    }
}

/// The fuzzy token of a selector: the id/class body, or the raw string
fn extract_token(selector: &str) -> &str {
    let trimmed = selector.trim();
    if let Some(rest) = trimmed.strip_prefix('#').or_else(|| trimmed.strip_prefix('.')) {
        return rest;
    }
    // Compound selectors like "div.card" hint on their last simple part
    if let Some(pos) = trimmed.rfind(['#', '.']) {
        return &trimmed[pos + 1..];
    }
    trimmed
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    let mut end = 0;
    for (i, _) in s.char_indices() {
        if i <= max {
            end = i;
        } else {
            break;
        }
    }
    end
}

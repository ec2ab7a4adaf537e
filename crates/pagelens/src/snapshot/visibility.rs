//! Visibility and layout probe
//!
//! An element is observable when its computed style keeps it rendered
//! (`display`, `visibility`, `opacity`) and no ancestor hides it via
//! `aria-hidden`. Off-screen elements stay observable; a zero-area rect
//! means laid-out-absent, which overlays skip but snapshots still report.

use crate::dom::{Document, NodeId, Rect};

/// Whether the element's own style and attributes keep it observable.
///
/// Tree walkers use this and prune subtrees, which makes the ancestor
/// checks implicit.
#[must_use]
pub fn is_self_visible(doc: &Document, node: NodeId) -> bool {
    if doc.element(node).is_none() {
        return true;
    }
    if doc.attr(node, "aria-hidden") == Some("true") {
        return false;
    }
    doc.computed_style(node).visible_self()
}

/// Whether the element and every ancestor keep it observable
#[must_use]
pub fn is_visible(doc: &Document, node: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if doc.element(n).is_some() && !is_self_visible(doc, n) {
            return false;
        }
        current = doc.parent(n);
    }
    true
}

/// Whether the element occupies area in the layout
#[must_use]
pub fn has_layout(doc: &Document, node: NodeId) -> bool {
    !doc.bounding_box(node).is_empty()
}

/// The element's client rectangle, verbatim from the environment
#[must_use]
pub fn bounding_box(doc: &Document, node: NodeId) -> Rect {
    doc.bounding_box(node)
}

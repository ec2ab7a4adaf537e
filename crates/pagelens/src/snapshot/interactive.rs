//! Interactive-mode walker
//!
//! Depth-first walk emitting one line per interactive element. Hidden
//! subtrees are pruned unless `includeHidden` is set, and indentation
//! collapses through non-emitted ancestors.

use crate::dom::{Document, NodeId, collapse_whitespace};

use super::capture::{SnapshotOptions, is_skippable, truncate_text};
use super::role::{self, LabelMap, Role};
use super::visibility;

/// Maximum text snippet length carried in search data
const SEARCH_SNIPPET_LEN: usize = 120;

/// One interactive element captured by the walk
#[derive(Debug)]
pub(crate) struct InteractiveItem {
    /// The element
    pub node: NodeId,
    /// Indentation depth (emitted ancestors only)
    pub depth: usize,
    /// Inferred role
    pub role: Role,
    /// Accessible name, possibly empty
    pub name: String,
    /// State flags in rendering order
    pub flags: Vec<&'static str>,
    /// Enriched haystack for grep
    pub search: String,
}

/// Collect interactive elements under `root` in document order
pub(crate) fn collect(
    doc: &Document,
    root: NodeId,
    options: &SnapshotOptions,
) -> Vec<InteractiveItem> {
    let labels = LabelMap::build(doc);
    let mut items = Vec::new();
    walk(doc, root, 0, 0, options, &labels, &mut items);
    items
}

fn walk(
    doc: &Document,
    node: NodeId,
    depth: usize,
    emit_depth: usize,
    options: &SnapshotOptions,
    labels: &LabelMap,
    items: &mut Vec<InteractiveItem>,
) {
    if depth > options.max_depth {
        return;
    }
    if doc.element(node).is_none() || is_skippable(doc, node) {
        return;
    }
    if !options.include_hidden && !visibility::is_self_visible(doc, node) {
        return;
    }

    let mut child_depth = emit_depth;
    if is_interactive(doc, node) {
        let info = role::resolve(doc, node, labels);
        let flags = info.state.list();
        let search = search_data(doc, node, &info.role, &info.name, &flags);
        items.push(InteractiveItem {
            node,
            depth: emit_depth,
            role: info.role,
            name: info.name,
            flags,
            search,
        });
        child_depth += 1;
    }

    for &child in doc.children(node) {
        walk(doc, child, depth + 1, child_depth, options, labels, items);
    }
}

/// Whether an element belongs in the interactive snapshot
fn is_interactive(doc: &Document, node: NodeId) -> bool {
    if role::resolve_role(doc, node).is_interactive() {
        return true;
    }
    doc.has_attr(node, "tabindex")
}

/// Build the enriched haystack: role, name, flags, attributes, text snippet
fn search_data(
    doc: &Document,
    node: NodeId,
    role: &Role,
    name: &str,
    flags: &[&'static str],
) -> String {
    let mut parts: Vec<String> = vec![role.as_str().to_string()];
    if !name.is_empty() {
        parts.push(name.to_string());
    }
    for flag in flags {
        parts.push((*flag).to_string());
    }
    if let Some(el) = doc.element(node) {
        for (key, value) in el.attrs() {
            if value.is_empty() {
                parts.push(key.to_string());
            } else {
                parts.push(format!("{key}={value}"));
            }
        }
    }
    let snippet = collapse_whitespace(&doc.text_content(node));
    if !snippet.is_empty() {
        parts.push(truncate_text(&snippet, SEARCH_SNIPPET_LEN));
    }
    parts.join(" ")
}

//! Selector resolution
//!
//! Resolves the three selector grammars commands accept: `@ref:N` handles
//! from the last snapshot, XPath expressions beginning with `/` (with
//! top-level `|` unions), and CSS selectors for everything else. A lookup
//! that finds nothing is not itself an error; callers decide whether
//! absence constitutes failure.

mod css;
mod xpath;

#[cfg(test)]
mod tests;

use crate::dom::{Document, NodeId};
use crate::snapshot::{ElementRef, RefMap};

/// The grammar a selector string uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// `@ref:N` handle
    Ref,
    /// XPath expression
    XPath,
    /// CSS selector
    Css,
}

/// Classify a selector string by its prefix
#[must_use]
pub fn classify(selector: &str) -> SelectorKind {
    if ElementRef::is_ref(selector) {
        SelectorKind::Ref
    } else if selector.starts_with('/') {
        SelectorKind::XPath
    } else {
        SelectorKind::Css
    }
}

/// Resolve a selector to the first matching element.
///
/// XPath unions evaluate branch by branch; the first branch with a match
/// wins. Invalid XPath and invalid CSS both resolve to `None`.
#[must_use]
pub fn resolve_first(doc: &Document, refs: &RefMap, selector: &str) -> Option<NodeId> {
    match classify(selector) {
        SelectorKind::Ref => refs.lookup(selector),
        SelectorKind::XPath => xpath::select_first(doc, selector),
        SelectorKind::Css => {
            let list = css::parse(selector)?;
            css::select_all(doc, doc.root(), &list).into_iter().next()
        }
    }
}

/// Resolve a selector to every matching element in document order.
///
/// XPath union branches concatenate, preserving branch order.
#[must_use]
pub fn resolve_all(doc: &Document, refs: &RefMap, selector: &str) -> Vec<NodeId> {
    match classify(selector) {
        SelectorKind::Ref => refs.lookup(selector).into_iter().collect(),
        SelectorKind::XPath => xpath::select_all(doc, selector),
        SelectorKind::Css => css::parse(selector)
            .map(|list| css::select_all(doc, doc.root(), &list))
            .unwrap_or_default(),
    }
}

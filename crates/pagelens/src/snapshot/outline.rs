//! Outline-mode walker
//!
//! Collects the page's structural skeleton: landmarks, headings, articles,
//! named regions, lists, and code blocks. Divs with a semantic id or class
//! and enough text are promoted to anonymous regions. Every line carries a
//! semantic XPath usable as a future selector; landmarks, articles, and
//! regions additionally receive refs.

use crate::dom::{Document, NodeId, collapse_whitespace};

use super::capture::{SnapshotOptions, is_skippable, truncate_text};
use super::role::{self, Role};
use super::visibility;

/// Word threshold for promoting a semantic div to a region
const PROMOTION_WORDS: usize = 50;

/// Id/class tokens that mark a div as semantically meaningful
const SEMANTIC_HINTS: &[&str] = &[
    "content", "main", "article", "post", "body", "sidebar", "summary", "description", "footer",
    "header", "nav", "section",
];

/// Which header counter an outline item feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutlineCounter {
    Landmark,
    Section,
    Heading,
    None,
}

/// One structural item captured by the walk
#[derive(Debug)]
pub(crate) struct OutlineItem {
    /// The element
    pub node: NodeId,
    /// Indentation depth (emitted ancestors only)
    pub depth: usize,
    /// Rendered label, e.g. `MAIN` or `HEADING level=2` or `LIST items=3`
    pub label: String,
    /// Display name, possibly empty
    pub name: String,
    /// Whether this item receives a ref
    pub wants_ref: bool,
    /// Lowercase role name for sidecar metadata
    pub role_name: &'static str,
    /// Semantic XPath for this element
    pub xpath: String,
    /// Which counter this item feeds
    pub counter: OutlineCounter,
    /// Enriched haystack for grep
    pub search: String,
}

/// Collect outline items under `root` in document order
pub(crate) fn collect(doc: &Document, root: NodeId, options: &SnapshotOptions) -> Vec<OutlineItem> {
    let mut items = Vec::new();
    walk(doc, root, 0, 0, options, &mut items);
    items
}

fn walk(
    doc: &Document,
    node: NodeId,
    depth: usize,
    emit_depth: usize,
    options: &SnapshotOptions,
    items: &mut Vec<OutlineItem>,
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
    if let Some(item) = classify(doc, node, emit_depth) {
        items.push(item);
        child_depth += 1;
    }

    for &child in doc.children(node) {
        walk(doc, child, depth + 1, child_depth, options, items);
    }
}

fn classify(doc: &Document, node: NodeId, depth: usize) -> Option<OutlineItem> {
    let inferred = role::resolve_role(doc, node);
    let tag = doc.tag(node)?;

    let (label, name, wants_ref, role_name, counter) = match inferred {
        Role::Main
        | Role::Banner
        | Role::Navigation
        | Role::Complementary
        | Role::ContentInfo
        | Role::Search
        | Role::Form => (
            inferred.token().to_string(),
            role::landmark_name(doc, node),
            true,
            inferred.as_str(),
            OutlineCounter::Landmark,
        ),
        Role::Region => {
            // Anonymous sections carry no outline weight
            let name = role::landmark_name(doc, node);
            if name.is_empty() {
                return None;
            }
            (
                inferred.token().to_string(),
                name,
                true,
                inferred.as_str(),
                OutlineCounter::Landmark,
            )
        }
        Role::Article => (
            inferred.token().to_string(),
            role::landmark_name(doc, node),
            true,
            inferred.as_str(),
            OutlineCounter::Section,
        ),
        Role::Heading(level) => (
            format!("HEADING level={level}"),
            collapse_whitespace(&doc.text_content(node)),
            false,
            inferred.as_str(),
            OutlineCounter::Heading,
        ),
        Role::List => {
            let item_count = doc
                .children(node)
                .iter()
                .filter(|&&child| doc.tag(child) == Some("li"))
                .count();
            (
                format!("LIST items={item_count}"),
                String::new(),
                false,
                inferred.as_str(),
                OutlineCounter::None,
            )
        }
        Role::Code if tag == "pre" => {
            let text = doc.text_content(node);
            let line_count = text.lines().filter(|l| !l.trim().is_empty()).count();
            let lang = detect_language(doc, node).unwrap_or_else(|| "text".to_string());
            (
                format!("CODE lang={lang} lines={line_count}"),
                String::new(),
                false,
                inferred.as_str(),
                OutlineCounter::None,
            )
        }
        Role::Generic if tag == "div" && is_promotable(doc, node) => {
            let name = promoted_name(doc, node);
            (
                "REGION".to_string(),
                name,
                true,
                "region",
                OutlineCounter::Section,
            )
        }
        _ => return None,
    };

    let xpath = semantic_xpath(doc, node);
    let search = search_data(doc, node, &label, &name, &xpath);
    Some(OutlineItem {
        node,
        depth,
        label,
        name,
        wants_ref,
        role_name,
        xpath,
        counter,
        search,
    })
}

/// Language marker from `class="language-..."` on a pre or a nested code
fn detect_language(doc: &Document, node: NodeId) -> Option<String> {
    let from_classes = |n: NodeId| -> Option<String> {
        doc.element(n)?
            .classes()
            .find_map(|c| c.strip_prefix("language-").or_else(|| c.strip_prefix("lang-")))
            .map(str::to_string)
    };
    if let Some(lang) = from_classes(node) {
        return Some(lang);
    }
    doc.children(node)
        .iter()
        .copied()
        .filter(|&c| doc.tag(c) == Some("code"))
        .find_map(from_classes)
}

/// Divs with a semantic id/class and enough prose become anonymous regions
fn is_promotable(doc: &Document, node: NodeId) -> bool {
    let Some(el) = doc.element(node) else {
        return false;
    };
    let semantic = el
        .id()
        .into_iter()
        .chain(el.classes())
        .any(|token| {
            let lower = token.to_ascii_lowercase();
            SEMANTIC_HINTS.iter().any(|hint| lower.contains(hint))
        });
    if !semantic {
        return false;
    }
    doc.text_content(node).split_whitespace().count() >= PROMOTION_WORDS
}

fn promoted_name(doc: &Document, node: NodeId) -> String {
    let Some(el) = doc.element(node) else {
        return String::new();
    };
    if let Some(id) = el.id() {
        return id.to_string();
    }
    el.classes().next().unwrap_or("").to_string()
}

/// Derive a semantic XPath for an element.
///
/// The path climbs until an id-carrying ancestor (which anchors it) or the
/// body, adding positional predicates only where same-tag siblings make
/// them necessary: `/main[@id='content']/article[2]`.
pub(crate) fn semantic_xpath(doc: &Document, node: NodeId) -> String {
    let mut steps: Vec<String> = Vec::new();
    let mut current = Some(node);
    while let Some(n) = current {
        let Some(el) = doc.element(n) else {
            break;
        };
        let tag = el.tag.clone();
        if tag == "#document" || tag == "html" || tag == "body" {
            break;
        }
        if let Some(id) = el.id() {
            steps.push(format!("{tag}[@id='{id}']"));
            break;
        }
        let parent = doc.parent(n);
        if let Some(p) = parent {
            let siblings: Vec<NodeId> = doc
                .children(p)
                .iter()
                .copied()
                .filter(|&c| doc.tag(c) == Some(tag.as_str()))
                .collect();
            if siblings.len() > 1 {
                let position = siblings.iter().position(|&c| c == n).unwrap_or(0) + 1;
                steps.push(format!("{tag}[{position}]"));
            } else {
                steps.push(tag);
            }
        } else {
            steps.push(tag);
        }
        current = parent;
    }
    steps.reverse();
    format!("/{}", steps.join("/"))
}

fn search_data(doc: &Document, node: NodeId, label: &str, name: &str, xpath: &str) -> String {
    let mut parts: Vec<String> = vec![label.to_string()];
    if !name.is_empty() {
        parts.push(name.to_string());
    }
    parts.push(xpath.to_string());
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
        parts.push(truncate_text(&snippet, 120));
    }
    parts.join(" ")
}

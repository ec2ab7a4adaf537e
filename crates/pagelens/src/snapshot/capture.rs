//! Snapshot entry point
//!
//! `create_snapshot` clears the ref map (starting a new epoch), walks the
//! chosen subtree in the requested mode, applies the grep filter at the
//! item level, assigns refs to retained items, and renders the stable
//! line-oriented text format with its `PAGE:` and mode header lines.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::overlay::OVERLAY_ATTR;

use super::content;
use super::grep::{GrepFilter, GrepSpec};
use super::interactive;
use super::outline::{self, OutlineCounter};
use super::reference::RefMap;

/// Default traversal depth cap
pub(crate) const DEFAULT_MAX_DEPTH: usize = 50;

/// Maximum rendered name length in snapshot lines
const NAME_MAX: usize = 80;

/// Marker appended when `maxLength` truncates the output
const TRUNCATION_MARKER: &str = "…";

/// Tags that never contribute to snapshots
const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "meta", "link", "title", "base",
];

/// Whether a node is invisible plumbing (scripts, head matter, the
/// highlight overlay)
pub(crate) fn is_skippable(doc: &Document, node: NodeId) -> bool {
    match doc.tag(node) {
        Some(tag) => SKIP_TAGS.contains(&tag) || doc.has_attr(node, OVERLAY_ATTR),
        None => false,
    }
}

/// Truncate to a byte budget at a char boundary, appending `...`
#[must_use]
pub(crate) fn truncate_text(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }
    let budget = max_len.saturating_sub(3);
    let mut end = 0;
    for (i, _) in text.char_indices() {
        if i <= budget {
            end = i;
        } else {
            break;
        }
    }
    format!("{}...", &text[..end])
}

/// Snapshot rendering strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotMode {
    /// Interactive elements with refs
    #[default]
    Interactive,
    /// Structural skeleton with semantic XPaths
    Outline,
    /// Readable text
    Content,
    /// Subtree serialization
    Extract,
}

impl SnapshotMode {
    /// Lowercase mode name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interactive => "interactive",
            Self::Outline => "outline",
            Self::Content => "content",
            Self::Extract => "extract",
        }
    }

    fn header_token(self) -> &'static str {
        match self {
            Self::Interactive => "INTERACTIVE",
            Self::Outline => "OUTLINE",
            Self::Content => "CONTENT",
            Self::Extract => "EXTRACT",
        }
    }
}

/// Output flavor for content and extract modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Role-labelled lines
    #[default]
    Tree,
    /// Cleaned HTML
    Html,
    /// Markdown
    Markdown,
}

/// Options accepted by the snapshot engine
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotOptions {
    /// Rendering mode
    pub mode: SnapshotMode,

    /// Output flavor, meaningful in content/extract modes
    pub format: SnapshotFormat,

    /// Optional subtree anchor selector; defaults to the body
    pub root: Option<String>,

    /// Traversal depth cap
    pub max_depth: usize,

    /// Include elements hidden by style or `aria-hidden`
    pub include_hidden: bool,

    /// Render hyperlinks in content mode
    pub include_links: bool,

    /// Render images in content mode
    pub include_images: bool,

    /// Item-level filter
    pub grep: Option<GrepSpec>,

    /// Output truncation cap in bytes
    pub max_length: Option<usize>,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            mode: SnapshotMode::Interactive,
            format: SnapshotFormat::Tree,
            root: None,
            max_depth: DEFAULT_MAX_DEPTH,
            include_hidden: false,
            include_links: false,
            include_images: false,
            grep: None,
            max_length: None,
        }
    }
}

/// Sidecar entry for one ref
#[derive(Debug, Clone, Serialize)]
pub struct RefEntry {
    /// A durable selector for the element: `#id` or a semantic XPath
    pub selector: String,

    /// Lowercase role name
    pub role: String,

    /// Accessible name, when one resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Counters and quality flags for one snapshot
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    /// Mode name
    pub mode: String,

    /// Emitted items
    pub element_count: usize,

    /// Whitespace-token count of the subtree's text content
    pub word_count: usize,

    /// Landmarks on the page (outline mode)
    pub landmark_count: usize,

    /// Articles and promoted regions (outline mode)
    pub section_count: usize,

    /// Headings on the page (outline mode)
    pub heading_count: usize,

    /// Retained items when grep is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_count: Option<usize>,

    /// Output hit the `maxLength` cap
    pub truncated: bool,

    /// The grep pattern failed to compile and substring matching was used
    pub grep_fallback: bool,
}

/// A rendered snapshot: the text tree, the ref sidecar, and metadata
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotData {
    /// Line-oriented textual representation
    pub tree: String,

    /// Ref sidecar for consumers
    pub refs: BTreeMap<String, RefEntry>,

    /// Counters and quality flags
    pub metadata: SnapshotMetadata,
}

/// Walk the document and render a snapshot.
///
/// Starts a new ref epoch: all previously issued refs are invalidated.
/// The engine degrades rather than fails; an unresolvable grep pattern or
/// an empty page still produce a well-formed snapshot.
pub fn create_snapshot(
    doc: &Document,
    refs: &mut RefMap,
    root: Option<NodeId>,
    options: &SnapshotOptions,
) -> SnapshotData {
    refs.clear();
    let root = root
        .or_else(|| doc.body())
        .unwrap_or_else(|| doc.root());

    let filter = options.grep.as_ref().map(GrepFilter::new);
    let word_count = doc.text_content(root).split_whitespace().count();

    let mut metadata = SnapshotMetadata {
        mode: options.mode.as_str().to_string(),
        word_count,
        grep_fallback: filter.as_ref().is_some_and(GrepFilter::used_fallback),
        ..SnapshotMetadata::default()
    };
    let mut ref_entries: BTreeMap<String, RefEntry> = BTreeMap::new();
    let mut body: Vec<String> = Vec::new();
    let stats;

    match options.mode {
        SnapshotMode::Interactive => {
            let items = interactive::collect(doc, root, options);
            let kept: Vec<_> = match &filter {
                Some(f) => items.into_iter().filter(|i| f.is_match(&i.search)).collect(),
                None => items,
            };
            if filter.is_some() {
                metadata.match_count = Some(kept.len());
            }
            metadata.element_count = kept.len();

            for item in &kept {
                let handle = refs.generate(item.node);
                let mut line = "  ".repeat(item.depth);
                line.push_str(item.role.token());
                if !item.name.is_empty() {
                    let _ = write!(line, " \"{}\"", truncate_text(&item.name, NAME_MAX));
                }
                let _ = write!(line, " {handle}");
                if !item.flags.is_empty() {
                    let _ = write!(line, " [{}]", item.flags.join(" "));
                }
                body.push(line);
                ref_entries.insert(
                    handle.to_string(),
                    RefEntry {
                        selector: selector_for(doc, item.node),
                        role: item.role.as_str().to_string(),
                        name: (!item.name.is_empty()).then(|| item.name.clone()),
                    },
                );
            }
            stats = format!("elements={} words={word_count}", metadata.element_count);
        }

        SnapshotMode::Outline => {
            let items = outline::collect(doc, root, options);
            for item in &items {
                match item.counter {
                    OutlineCounter::Landmark => metadata.landmark_count += 1,
                    OutlineCounter::Section => metadata.section_count += 1,
                    OutlineCounter::Heading => metadata.heading_count += 1,
                    OutlineCounter::None => {}
                }
            }
            let kept: Vec<_> = match &filter {
                Some(f) => items.into_iter().filter(|i| f.is_match(&i.search)).collect(),
                None => items,
            };
            if filter.is_some() {
                metadata.match_count = Some(kept.len());
            }
            metadata.element_count = kept.len();

            for item in &kept {
                let mut line = "  ".repeat(item.depth);
                line.push_str(&item.label);
                if !item.name.is_empty() {
                    let _ = write!(line, " \"{}\"", truncate_text(&item.name, NAME_MAX));
                }
                if item.wants_ref {
                    let handle = refs.generate(item.node);
                    let _ = write!(line, " {handle}");
                    ref_entries.insert(
                        handle.to_string(),
                        RefEntry {
                            selector: selector_for(doc, item.node),
                            role: item.role_name.to_string(),
                            name: (!item.name.is_empty()).then(|| item.name.clone()),
                        },
                    );
                }
                let _ = write!(line, " {}", item.xpath);
                body.push(line);
            }
            stats = format!(
                "landmarks={} sections={} headings={} words={word_count}",
                metadata.landmark_count, metadata.section_count, metadata.heading_count
            );
        }

        SnapshotMode::Content | SnapshotMode::Extract => {
            let html_format = options.format == SnapshotFormat::Html;
            if html_format {
                let html = content::render_html(doc, root, options);
                if let Some(f) = &filter {
                    metadata.match_count =
                        Some(html.lines().filter(|line| f.is_match(line)).count());
                }
                body = html.lines().map(str::to_string).collect();
                metadata.element_count = body.len();
            } else {
                let blocks = content::collect(doc, root, options);
                let kept: Vec<_> = match &filter {
                    Some(f) => blocks
                        .into_iter()
                        .filter(|b| f.is_match(&b.search))
                        .collect(),
                    None => blocks,
                };
                if filter.is_some() {
                    metadata.match_count = Some(kept.len());
                }
                metadata.element_count = kept.len();

                let tree_flavor = options.mode == SnapshotMode::Content
                    && options.format == SnapshotFormat::Tree;
                body = if tree_flavor {
                    content::assemble_tree(&kept)
                } else {
                    content::assemble_markdown(&kept)
                };
            }
            stats = format!("words={word_count}");
        }
    }

    let mut header = format!("{}: {stats}", options.mode.header_token());
    if let Some(f) = &filter {
        let _ = write!(
            header,
            " grep={} matches={}",
            f.pattern(),
            metadata.match_count.unwrap_or(0)
        );
    }

    let mut lines = Vec::with_capacity(body.len() + 3);
    lines.push(format!("PAGE: \"{}\" {}", doc.title(), doc.url()));
    lines.push(header);
    lines.push(String::new());
    lines.extend(body);
    let mut tree = lines.join("\n");

    if let Some(cap) = options.max_length
        && tree.len() > cap
    {
        let mut end = 0;
        for (i, _) in tree.char_indices() {
            if i <= cap {
                end = i;
            } else {
                break;
            }
        }
        tree.truncate(end);
        tree.push_str(TRUNCATION_MARKER);
        metadata.truncated = true;
    }

    debug!(
        mode = options.mode.as_str(),
        elements = metadata.element_count,
        refs = refs.len(),
        "snapshot complete"
    );

    SnapshotData {
        tree,
        refs: ref_entries,
        metadata,
    }
}

/// A durable selector for the sidecar: `#id` when available, else the
/// semantic XPath
fn selector_for(doc: &Document, node: NodeId) -> String {
    if let Some(el) = doc.element(node)
        && let Some(id) = el.id()
    {
        return format!("#{id}");
    }
    outline::semantic_xpath(doc, node)
}

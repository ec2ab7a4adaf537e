//! Content and extract rendering
//!
//! Renders the readable text of a subtree as markdown, as role-labelled
//! tree lines, or as cleaned HTML. Navigation, complementary, and footer
//! landmarks are skipped along with scripts and styles; whitespace runs
//! collapse to single spaces.

use crate::dom::{Document, NodeData, NodeId, collapse_whitespace};

use super::capture::{SnapshotOptions, is_skippable, truncate_text};
use super::role::{self, Role};
use super::visibility;

/// Elements serialized without children or a closing tag
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Block category, used for inter-block spacing and tree labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Heading(u8),
    Paragraph,
    ListItem,
    Code,
    Image,
}

/// One readable block of the page
#[derive(Debug)]
pub(crate) struct ContentBlock {
    pub kind: BlockKind,
    pub lines: Vec<String>,
    pub search: String,
}

/// Collect readable blocks under `root`, rendered as markdown lines
pub(crate) fn collect(doc: &Document, root: NodeId, options: &SnapshotOptions) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    walk(doc, root, 0, options, &mut blocks);
    blocks
}

fn walk(
    doc: &Document,
    node: NodeId,
    list_depth: usize,
    options: &SnapshotOptions,
    blocks: &mut Vec<ContentBlock>,
) {
    match doc.node(node) {
        Some(NodeData::Text(text)) => {
            let collapsed = collapse_whitespace(text);
            if !collapsed.is_empty() {
                push_block(blocks, BlockKind::Paragraph, vec![collapsed]);
            }
        }
        Some(NodeData::Element(_)) => walk_element(doc, node, list_depth, options, blocks),
        None => {}
    }
}

fn walk_element(
    doc: &Document,
    node: NodeId,
    list_depth: usize,
    options: &SnapshotOptions,
    blocks: &mut Vec<ContentBlock>,
) {
    if is_skippable(doc, node) {
        return;
    }
    if !options.include_hidden && !visibility::is_self_visible(doc, node) {
        return;
    }
    let inferred = role::resolve_role(doc, node);
    if matches!(
        inferred,
        Role::Navigation | Role::Complementary | Role::ContentInfo
    ) {
        return;
    }

    let tag = doc.tag(node).unwrap_or("");
    match inferred {
        Role::Heading(level) => {
            let text = inline_text(doc, node, options);
            if !text.is_empty() {
                let marker = "#".repeat(usize::from(level.clamp(1, 6)));
                push_block(blocks, BlockKind::Heading(level), vec![format!("{marker} {text}")]);
            }
        }
        Role::List => render_list(doc, node, list_depth, options, blocks),
        Role::Code if tag == "pre" => {
            let text = doc.text_content(node);
            let lang = code_language(doc, node);
            let mut lines = vec![format!("```{lang}")];
            lines.extend(text.trim_matches('\n').lines().map(str::to_string));
            lines.push("```".to_string());
            push_block(blocks, BlockKind::Code, lines);
        }
        _ if tag == "p" => {
            let text = inline_text(doc, node, options);
            if !text.is_empty() {
                push_block(blocks, BlockKind::Paragraph, vec![text]);
            }
        }
        _ if tag == "img" => {
            if options.include_images {
                let alt = doc.attr(node, "alt").unwrap_or("");
                let src = doc.attr(node, "src").unwrap_or("");
                push_block(blocks, BlockKind::Image, vec![format!("![{alt}]({src})")]);
            }
        }
        _ if tag == "a" => {
            let text = inline_text(doc, node, options);
            if !text.is_empty() {
                push_block(blocks, BlockKind::Paragraph, vec![text]);
            }
        }
        _ => {
            for &child in doc.children(node) {
                walk(doc, child, list_depth, options, blocks);
            }
        }
    }
}

fn render_list(
    doc: &Document,
    node: NodeId,
    list_depth: usize,
    options: &SnapshotOptions,
    blocks: &mut Vec<ContentBlock>,
) {
    for &child in doc.children(node) {
        if doc.tag(child) != Some("li") {
            continue;
        }
        if !options.include_hidden && !visibility::is_self_visible(doc, child) {
            continue;
        }
        let text = inline_text_shallow(doc, child, options);
        if !text.is_empty() {
            let indent = "  ".repeat(list_depth);
            push_block(blocks, BlockKind::ListItem, vec![format!("{indent}- {text}")]);
        }
        for &grandchild in doc.children(child) {
            if matches!(doc.tag(grandchild), Some("ul" | "ol")) {
                render_list(doc, grandchild, list_depth + 1, options, blocks);
            }
        }
    }
}

/// Inline rendering of a node's content: text, links, images, inline code
fn inline_text(doc: &Document, node: NodeId, options: &SnapshotOptions) -> String {
    let mut out = String::new();
    inline_into(doc, node, options, false, &mut out);
    collapse_whitespace(&out)
}

/// Inline rendering that does not descend into nested lists
fn inline_text_shallow(doc: &Document, node: NodeId, options: &SnapshotOptions) -> String {
    let mut out = String::new();
    inline_into(doc, node, options, true, &mut out);
    collapse_whitespace(&out)
}

fn inline_into(
    doc: &Document,
    node: NodeId,
    options: &SnapshotOptions,
    skip_lists: bool,
    out: &mut String,
) {
    for &child in doc.children(node) {
        match doc.node(child) {
            Some(NodeData::Text(text)) => out.push_str(text),
            Some(NodeData::Element(el)) => {
                if is_skippable(doc, child) {
                    continue;
                }
                if !options.include_hidden && !visibility::is_self_visible(doc, child) {
                    continue;
                }
                match el.tag.as_str() {
                    "ul" | "ol" if skip_lists => {}
                    "a" if options.include_links && el.has_attr("href") => {
                        let mut text = String::new();
                        inline_into(doc, child, options, skip_lists, &mut text);
                        let href = el.attr("href").unwrap_or("");
                        out.push_str(&format!("[{}]({href})", collapse_whitespace(&text)));
                    }
                    "img" => {
                        if options.include_images {
                            let alt = el.attr("alt").unwrap_or("");
                            let src = el.attr("src").unwrap_or("");
                            out.push_str(&format!("![{alt}]({src})"));
                        }
                    }
                    "code" => {
                        let text = collapse_whitespace(&doc.text_content(child));
                        if !text.is_empty() {
                            out.push_str(&format!("`{text}`"));
                        }
                    }
                    "br" => out.push(' '),
                    _ => inline_into(doc, child, options, skip_lists, out),
                }
                out.push(' ');
            }
            None => {}
        }
    }
}

fn code_language(doc: &Document, node: NodeId) -> String {
    let from_classes = |n: NodeId| -> Option<String> {
        doc.element(n)?
            .classes()
            .find_map(|c| c.strip_prefix("language-").or_else(|| c.strip_prefix("lang-")))
            .map(str::to_string)
    };
    from_classes(node)
        .or_else(|| {
            doc.children(node)
                .iter()
                .copied()
                .filter(|&c| doc.tag(c) == Some("code"))
                .find_map(from_classes)
        })
        .unwrap_or_default()
}

fn push_block(blocks: &mut Vec<ContentBlock>, kind: BlockKind, lines: Vec<String>) {
    let search = lines.join(" ");
    blocks.push(ContentBlock {
        kind,
        lines,
        search,
    });
}

/// Join filtered blocks into markdown body lines: consecutive list items
/// stay adjacent, everything else gets a blank separator
pub(crate) fn assemble_markdown(blocks: &[ContentBlock]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut previous: Option<BlockKind> = None;
    for block in blocks {
        let adjacent = matches!(
            (previous, block.kind),
            (Some(BlockKind::ListItem), BlockKind::ListItem)
        );
        if !out.is_empty() && !adjacent {
            out.push(String::new());
        }
        out.extend(block.lines.iter().cloned());
        previous = Some(block.kind);
    }
    out
}

/// Render filtered blocks as role-labelled tree lines
pub(crate) fn assemble_tree(blocks: &[ContentBlock]) -> Vec<String> {
    let mut out = Vec::new();
    for block in blocks {
        let text = truncate_text(&block.lines.join(" "), 200);
        let line = match block.kind {
            BlockKind::Heading(level) => {
                let stripped = text.trim_start_matches('#');
                format!("HEADING level={level} \"{}\"", stripped.trim())
            }
            BlockKind::Paragraph => format!("PARAGRAPH \"{text}\""),
            BlockKind::ListItem => format!("LISTITEM \"{}\"", text.trim_start_matches("- ").trim()),
            BlockKind::Code => format!("CODE \"{text}\""),
            BlockKind::Image => format!("IMAGE \"{text}\""),
        };
        out.push(line);
    }
    out
}

/// Serialize a subtree to HTML, cleaned of scripts, styles, and hidden
/// elements
pub(crate) fn render_html(doc: &Document, root: NodeId, options: &SnapshotOptions) -> String {
    let mut out = String::new();
    serialize(doc, root, options, &mut out);
    out
}

fn serialize(doc: &Document, node: NodeId, options: &SnapshotOptions, out: &mut String) {
    match doc.node(node) {
        Some(NodeData::Text(text)) => out.push_str(&escape_text(text)),
        Some(NodeData::Element(el)) => {
            let tag = el.tag.clone();
            if tag == "#document" {
                for &child in doc.children(node) {
                    serialize(doc, child, options, out);
                }
                return;
            }
            if is_skippable(doc, node) {
                return;
            }
            if !options.include_hidden && !visibility::is_self_visible(doc, node) {
                return;
            }
            out.push('<');
            out.push_str(&tag);
            if let Some(el) = doc.element(node) {
                for (key, value) in el.attrs() {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
            }
            out.push('>');
            if VOID_TAGS.contains(&tag.as_str()) {
                return;
            }
            for &child in doc.children(node) {
                serialize(doc, child, options, out);
            }
            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
        None => {}
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

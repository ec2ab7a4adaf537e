//! HTML loading
//!
//! Host-supplied HTML is parsed once with `scraper` and converted into the
//! arena document. Comments, doctypes, and processing instructions are
//! dropped; text nodes are kept verbatim so text-content word counts match
//! the source.

use scraper::{ElementRef as SourceElement, Html, Node as SourceNode};
use tracing::debug;

use super::{Document, ElementData, NodeId};

/// Parse an HTML string into a live document
pub(crate) fn build(html: &str, url: &str) -> Document {
    debug!(html_len = html.len(), url, "parsing document");
    let parsed = Html::parse_document(html);
    let mut doc = Document::with_url(url);
    let root = doc.root();
    convert_element(&mut doc, root, parsed.root_element());

    if let Some(title_node) = doc.find_first("title") {
        let title = collapse_whitespace(&doc.text_content(title_node));
        doc.set_title(title);
    }

    doc
}

fn convert_element(doc: &mut Document, parent: NodeId, source: SourceElement<'_>) -> NodeId {
    let mut data = ElementData::new(source.value().name().to_ascii_lowercase());
    for (name, value) in source.value().attrs() {
        data.set_attr(name.to_ascii_lowercase(), value);
    }
    seed_form_state(&mut data);

    let id = doc.append_element_data(parent, data);
    for child in source.children() {
        if let Some(child_el) = SourceElement::wrap(child) {
            convert_element(doc, id, child_el);
        } else if let SourceNode::Text(text) = child.value() {
            doc.append_text(id, text.to_string());
        }
    }

    // A textarea's initial value is its text content
    if doc.tag(id) == Some("textarea") {
        let content = doc.text_content(id);
        if let Some(el) = doc.element_mut(id) {
            el.value = Some(content);
        }
    }

    id
}

/// Seed mutable IDL state from the markup attributes
fn seed_form_state(data: &mut ElementData) {
    match data.tag.as_str() {
        "input" => {
            data.value = Some(data.attr("value").unwrap_or("").to_string());
            data.checked = data.has_attr("checked");
        }
        "option" => {
            data.selected = data.has_attr("selected");
        }
        _ => {}
    }
}

/// Collapse runs of whitespace into single spaces and trim
#[must_use]
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

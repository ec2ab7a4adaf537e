//! Unit tests for the action executors

mod control_tests;
mod inspect_tests;

use crate::dom::NodeId;
use crate::page::PageState;
use crate::snapshot::{SnapshotOptions, create_snapshot};

fn page(html: &str) -> PageState {
    PageState::from_html(html, "https://example.com/")
}

/// Run an interactive snapshot so `@ref:N` selectors resolve
fn snapshot_refs(page: &mut PageState) {
    let data = create_snapshot(
        &page.document,
        &mut page.refs,
        None,
        &SnapshotOptions::default(),
    );
    page.last_snapshot = Some(data);
}

fn by_id(page: &PageState, id: &str) -> NodeId {
    page.document
        .all_elements()
        .into_iter()
        .find(|&n| page.document.attr(n, "id") == Some(id))
        .expect("element by id")
}

// =============================================================================
// Key-combination parsing
// =============================================================================

#[test]
fn test_parse_combo_plain_key() {
    let (modifiers, key) = super::keys::parse_combo("enter");
    assert_eq!(key, "Enter");
    assert!(!modifiers.ctrl && !modifiers.shift);
}

#[test]
fn test_parse_combo_with_modifiers() {
    let (modifiers, key) = super::keys::parse_combo("Control+Shift+k");
    assert!(modifiers.ctrl);
    assert!(modifiers.shift);
    assert!(!modifiers.alt);
    assert_eq!(key, "k");
}

#[test]
fn test_parse_combo_literal_plus() {
    let (modifiers, key) = super::keys::parse_combo("+");
    assert_eq!(key, "+");
    assert!(!modifiers.ctrl);
}

#[test]
fn test_parse_combo_named_arrow() {
    let (_, key) = super::keys::parse_combo("down");
    assert_eq!(key, "ArrowDown");
}

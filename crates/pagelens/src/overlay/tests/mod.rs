//! Unit tests for the highlight overlay

use crate::dom::{Document, Event, EventType, NodeId, Rect};
use crate::overlay::{HighlightOverlay, OVERLAY_ATTR, OverlayState};
use crate::snapshot::{RefMap, SnapshotData, SnapshotOptions, create_snapshot};

fn setup(html: &str) -> (Document, RefMap, SnapshotData) {
    let doc = Document::parse(html, "https://example.com/");
    let mut refs = RefMap::new();
    let data = create_snapshot(&doc, &mut refs, None, &SnapshotOptions::default());
    (doc, refs, data)
}

fn box_nodes(doc: &Document) -> Vec<NodeId> {
    doc.all_elements()
        .into_iter()
        .filter(|&n| doc.has_attr(n, "data-ref"))
        .collect()
}

fn overlay_root(doc: &Document) -> Option<NodeId> {
    doc.all_elements()
        .into_iter()
        .find(|&n| doc.has_attr(n, OVERLAY_ATTR))
}

#[test]
fn test_show_creates_boxes_for_laid_out_refs() {
    let (mut doc, refs, data) = setup("<button>A</button><button>B</button>");
    let buttons: Vec<NodeId> = doc
        .all_elements()
        .into_iter()
        .filter(|&n| doc.tag(n) == Some("button"))
        .collect();
    doc.set_layout_rect(buttons[0], Rect::new(10.0, 20.0, 80.0, 24.0));
    // Second button stays without layout: zero-area, skipped

    let mut overlay = HighlightOverlay::new();
    let count = overlay.show(&mut doc, &refs, &data);

    assert_eq!(count, 1);
    assert!(overlay.is_active());
    let boxes = box_nodes(&doc);
    assert_eq!(boxes.len(), 1);
    let style = doc.attr(boxes[0], "style").expect("style").to_string();
    assert!(style.contains("translate3d(10px,20px,0)"), "{style}");
    assert!(doc.attr(boxes[0], "data-ref") == Some("@ref:0"));
}

#[test]
fn test_show_skips_removed_elements() {
    let (mut doc, refs, data) = setup("<button>A</button>");
    let button = doc.find_first("button").expect("button");
    doc.set_layout_rect(button, Rect::new(0.0, 0.0, 10.0, 10.0));
    doc.remove(button);

    let mut overlay = HighlightOverlay::new();
    assert_eq!(overlay.show(&mut doc, &refs, &data), 0);
}

#[test]
fn test_clear_is_idempotent_and_removes_layer() {
    let (mut doc, refs, data) = setup("<button>A</button>");
    let button = doc.find_first("button").expect("button");
    doc.set_layout_rect(button, Rect::new(0.0, 0.0, 10.0, 10.0));

    let mut overlay = HighlightOverlay::new();
    overlay.show(&mut doc, &refs, &data);
    assert!(overlay_root(&doc).is_some());

    overlay.clear(&mut doc);
    assert_eq!(overlay.state(), OverlayState::Idle);
    assert!(overlay_root(&doc).is_none());

    // Clearing again is a no-op
    overlay.clear(&mut doc);
    assert_eq!(overlay.state(), OverlayState::Idle);
}

#[test]
fn test_scroll_schedules_a_throttled_refresh() {
    let (mut doc, refs, data) = setup("<button>A</button>");
    let button = doc.find_first("button").expect("button");
    doc.set_layout_rect(button, Rect::new(10.0, 20.0, 80.0, 24.0));

    let mut overlay = HighlightOverlay::new();
    overlay.show(&mut doc, &refs, &data);

    doc.scroll_to(0.0, 5.0);
    let root = doc.root();
    doc.dispatch(Event::new(EventType::Scroll, root));
    doc.dispatch(Event::new(EventType::Scroll, root));
    overlay.sync(&mut doc);

    let boxes = box_nodes(&doc);
    let style = doc.attr(boxes[0], "style").expect("style");
    assert!(style.contains("translate3d(10px,15px,0)"), "{style}");
}

#[test]
fn test_sync_without_scroll_is_a_noop() {
    let (mut doc, refs, data) = setup("<button>A</button>");
    let button = doc.find_first("button").expect("button");
    doc.set_layout_rect(button, Rect::new(1.0, 1.0, 5.0, 5.0));

    let mut overlay = HighlightOverlay::new();
    overlay.show(&mut doc, &refs, &data);
    let before = doc.attr(box_nodes(&doc)[0], "style").map(str::to_string);
    overlay.sync(&mut doc);
    let after = doc.attr(box_nodes(&doc)[0], "style").map(str::to_string);
    assert_eq!(before, after);
}

#[test]
fn test_snapshot_walkers_skip_the_overlay_layer() {
    let (mut doc, refs, data) = setup("<button>A</button>");
    let button = doc.find_first("button").expect("button");
    doc.set_layout_rect(button, Rect::new(0.0, 0.0, 10.0, 10.0));

    let mut overlay = HighlightOverlay::new();
    overlay.show(&mut doc, &refs, &data);

    let mut fresh = RefMap::new();
    let second = create_snapshot(&doc, &mut fresh, None, &SnapshotOptions::default());
    assert_eq!(
        second.metadata.element_count, 1,
        "overlay nodes must not be captured: {}",
        second.tree
    );
}

#[test]
fn test_show_replaces_previous_layer() {
    let (mut doc, refs, data) = setup("<button>A</button>");
    let button = doc.find_first("button").expect("button");
    doc.set_layout_rect(button, Rect::new(0.0, 0.0, 10.0, 10.0));

    let mut overlay = HighlightOverlay::new();
    overlay.show(&mut doc, &refs, &data);
    overlay.show(&mut doc, &refs, &data);

    let connected_roots: Vec<NodeId> = doc
        .all_elements()
        .into_iter()
        .filter(|&n| doc.has_attr(n, OVERLAY_ATTR))
        .collect();
    assert_eq!(connected_roots.len(), 1, "one layer at a time");
}

//! Unit tests for the headless document model

mod event_tests;

use crate::dom::{Document, Rect};

fn doc(html: &str) -> Document {
    Document::parse(html, "https://example.com/")
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_extracts_title() {
    let d = doc("<html><head><title>  My   Page </title></head><body></body></html>");
    assert_eq!(d.title(), "My Page");
    assert_eq!(d.url(), "https://example.com/");
}

#[test]
fn test_parse_builds_body() {
    let d = doc("<p>hello</p>");
    let body = d.body().expect("body");
    assert_eq!(d.tag(body), Some("body"));
    assert_eq!(d.children(body).len(), 1);
}

#[test]
fn test_parse_lowercases_tags_and_attrs() {
    let d = doc("<DIV ID=\"Box\">x</DIV>");
    let div = d.find_first("div").expect("div");
    assert_eq!(d.attr(div, "id"), Some("Box"));
}

#[test]
fn test_parse_seeds_input_state() {
    let d = doc(
        "<input id=\"a\" value=\"seed\"><input id=\"b\" type=\"checkbox\" checked>\
         <textarea id=\"t\">inner text</textarea>",
    );
    let a = d.find_first("input").expect("input");
    assert_eq!(d.value(a), Some("seed".to_string()));

    let checkbox = d
        .all_elements()
        .into_iter()
        .find(|&n| d.attr(n, "id") == Some("b"))
        .expect("checkbox");
    assert!(d.is_checked(checkbox));

    let textarea = d.find_first("textarea").expect("textarea");
    assert_eq!(d.value(textarea), Some("inner text".to_string()));
}

#[test]
fn test_subtree_is_preorder() {
    let d = doc("<div id=\"a\"><span id=\"b\">x</span></div><p id=\"c\">y</p>");
    let ids: Vec<&str> = d
        .subtree(d.root())
        .into_iter()
        .filter_map(|n| d.attr(n, "id"))
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

// =============================================================================
// Mutation
// =============================================================================

#[test]
fn test_attribute_roundtrip() {
    let mut d = doc("<div id=\"x\"></div>");
    let div = d.find_first("div").expect("div");
    assert!(!d.has_attr(div, "data-k"));
    d.set_attr(div, "data-k", "v");
    assert_eq!(d.attr(div, "data-k"), Some("v"));
    assert!(d.remove_attr(div, "data-k"));
    assert!(!d.has_attr(div, "data-k"));
    assert!(!d.remove_attr(div, "data-k"));
}

#[test]
fn test_text_content_concatenates_in_order() {
    let d = doc("<div>one <b>two</b> three</div>");
    let div = d.find_first("div").expect("div");
    let text = d.text_content(div);
    assert_eq!(
        text.split_whitespace().collect::<Vec<_>>(),
        vec!["one", "two", "three"]
    );
}

#[test]
fn test_remove_disconnects_subtree() {
    let mut d = doc("<div id=\"outer\"><span id=\"inner\">x</span></div>");
    let outer = d.find_first("div").expect("div");
    let inner = d.find_first("span").expect("span");
    assert!(d.is_connected(inner));

    d.remove(outer);
    assert!(!d.is_connected(outer));
    assert!(!d.is_connected(inner));
    // Handles stay valid for inspection
    assert_eq!(d.tag(inner), Some("span"));
}

#[test]
fn test_set_text_replaces_element_children() {
    let mut d = doc("<div><span>old</span></div>");
    let div = d.find_first("div").expect("div");
    d.set_text(div, "new");
    assert_eq!(d.text_content(div), "new");
    assert_eq!(d.children(div).len(), 1);
}

// =============================================================================
// Style, layout, scrolling
// =============================================================================

#[test]
fn test_computed_style_reads_inline() {
    let d = doc("<div style=\"display:none\"></div><p hidden>x</p>");
    let div = d.find_first("div").expect("div");
    assert!(d.computed_style(div).display_none);
    let p = d.find_first("p").expect("p");
    assert!(d.computed_style(p).display_none);
}

#[test]
fn test_bounding_box_defaults_to_zero_rect() {
    let mut d = doc("<button>x</button>");
    let button = d.find_first("button").expect("button");
    assert!(d.bounding_box(button).is_empty());

    d.set_layout_rect(button, Rect::new(10.0, 20.0, 100.0, 30.0));
    let rect = d.bounding_box(button);
    assert!((rect.y - 20.0).abs() < f64::EPSILON);
    assert!(!rect.is_empty());
}

#[test]
fn test_window_scroll_clamps_at_zero() {
    let mut d = doc("<p>x</p>");
    d.scroll_by(50.0, 100.0);
    assert_eq!(d.scroll_position(), (50.0, 100.0));
    d.scroll_by(-500.0, -500.0);
    assert_eq!(d.scroll_position(), (0.0, 0.0));
}

#[test]
fn test_scroll_into_view_uses_layout_rect() {
    let mut d = doc("<button>x</button>");
    let button = d.find_first("button").expect("button");
    d.set_layout_rect(button, Rect::new(0.0, 480.0, 10.0, 10.0));
    d.scroll_into_view(button);
    assert_eq!(d.scroll_position().1, 480.0);
}

// =============================================================================
// Focus
// =============================================================================

#[test]
fn test_focus_tracks_active_element() {
    let mut d = doc("<input id=\"a\"><div id=\"b\">x</div>");
    let input = d.find_first("input").expect("input");
    let div = d.find_first("div").expect("div");

    assert!(d.focus(input));
    assert_eq!(d.active_element(), Some(input));

    // Plain divs are not focusable
    assert!(!d.focus(div));
    assert_eq!(d.active_element(), Some(input));

    assert!(d.blur(input));
    assert_eq!(d.active_element(), None);
}

#[test]
fn test_focusable_tags() {
    let d = doc(
        "<a id=\"l\" href=\"/x\">x</a><a id=\"n\">y</a>\
         <div id=\"t\" tabindex=\"0\">z</div>",
    );
    let by_id = |id: &str| {
        d.all_elements()
            .into_iter()
            .find(|&n| d.attr(n, "id") == Some(id))
            .expect("element")
    };
    assert!(d.is_focusable(by_id("l")));
    assert!(!d.is_focusable(by_id("n")));
    assert!(d.is_focusable(by_id("t")));
}

#[test]
fn test_removed_active_element_is_cleared() {
    let mut d = doc("<input>");
    let input = d.find_first("input").expect("input");
    d.focus(input);
    d.remove(input);
    assert_eq!(d.active_element(), None);
}

//! Unit tests for the snapshot subsystem


use crate::dom::Document;
use crate::snapshot::{
    ElementRef, LabelMap, RefMap, Role, accessible_name, is_visible, resolve_role, state_flags,
};

fn doc(html: &str) -> Document {
    Document::parse(html, "https://example.com/")
}

fn by_id(d: &Document, id: &str) -> crate::dom::NodeId {
    d.all_elements()
        .into_iter()
        .find(|&n| d.attr(n, "id") == Some(id))
        .expect("element by id")
}

// =============================================================================
// Element references
// =============================================================================

#[test]
fn test_ref_format_roundtrip() {
    let handle = ElementRef::new(7);
    assert_eq!(handle.to_string(), "@ref:7");
    assert_eq!(ElementRef::parse("@ref:7"), Ok(handle));
}

#[test]
fn test_ref_parse_rejects_bad_formats() {
    assert!(ElementRef::parse("ref:1").is_err());
    assert!(ElementRef::parse("@ref:").is_err());
    assert!(ElementRef::parse("@ref:12a").is_err());
    assert!(ElementRef::parse("@ref:-1").is_err());
}

#[test]
fn test_refmap_generate_is_idempotent_and_sequential() {
    let d = doc("<button>a</button><button>b</button>");
    let buttons: Vec<_> = d
        .all_elements()
        .into_iter()
        .filter(|&n| d.tag(n) == Some("button"))
        .collect();
    let mut refs = RefMap::new();

    let first = refs.generate(buttons[0]);
    let second = refs.generate(buttons[1]);
    assert_eq!(first.number(), 0);
    assert_eq!(second.number(), 1);
    assert_eq!(refs.generate(buttons[0]), first, "idempotent per element");
    assert_eq!(refs.len(), 2);
}

#[test]
fn test_refmap_clear_starts_a_new_epoch() {
    let d = doc("<button>a</button>");
    let button = d.find_first("button").expect("button");
    let mut refs = RefMap::new();
    let old = refs.generate(button);

    refs.clear();
    assert!(refs.get(old).is_none(), "clearing invalidates handles");
    assert!(refs.is_empty());

    let renumbered = refs.generate(button);
    assert_eq!(renumbered.number(), 0, "numbering restarts at zero");
}

#[test]
fn test_refmap_set_replaces_both_directions() {
    let d = doc("<button>a</button><button>b</button>");
    let buttons: Vec<_> = d
        .all_elements()
        .into_iter()
        .filter(|&n| d.tag(n) == Some("button"))
        .collect();
    let mut refs = RefMap::new();
    let handle = refs.generate(buttons[0]);

    refs.set(handle, buttons[1]);
    assert_eq!(refs.get(handle), Some(buttons[1]));
    assert_eq!(refs.ref_of(buttons[0]), None);
}

// =============================================================================
// Roles
// =============================================================================

#[test]
fn test_tag_implicit_roles() {
    let d = doc(
        "<button id=\"b\">x</button>\
         <a id=\"l\" href=\"/\">x</a><a id=\"plain\">x</a>\
         <input id=\"t\"><input id=\"c\" type=\"checkbox\"><input id=\"r\" type=\"radio\">\
         <input id=\"s\" type=\"submit\">\
         <select id=\"sel\"></select><textarea id=\"ta\"></textarea>\
         <h3 id=\"h\">x</h3><main id=\"m\"></main><nav id=\"n\"></nav>\
         <ul id=\"u\"></ul><pre id=\"p\"></pre><article id=\"art\"></article>",
    );
    assert_eq!(resolve_role(&d, by_id(&d, "b")), Role::Button);
    assert_eq!(resolve_role(&d, by_id(&d, "l")), Role::Link);
    assert_eq!(resolve_role(&d, by_id(&d, "plain")), Role::Generic);
    assert_eq!(resolve_role(&d, by_id(&d, "t")), Role::Textbox);
    assert_eq!(resolve_role(&d, by_id(&d, "c")), Role::Checkbox);
    assert_eq!(resolve_role(&d, by_id(&d, "r")), Role::Radio);
    assert_eq!(resolve_role(&d, by_id(&d, "s")), Role::Button);
    assert_eq!(resolve_role(&d, by_id(&d, "sel")), Role::Combobox);
    assert_eq!(resolve_role(&d, by_id(&d, "ta")), Role::Textbox);
    assert_eq!(resolve_role(&d, by_id(&d, "h")), Role::Heading(3));
    assert_eq!(resolve_role(&d, by_id(&d, "m")), Role::Main);
    assert_eq!(resolve_role(&d, by_id(&d, "n")), Role::Navigation);
    assert_eq!(resolve_role(&d, by_id(&d, "u")), Role::List);
    assert_eq!(resolve_role(&d, by_id(&d, "p")), Role::Code);
    assert_eq!(resolve_role(&d, by_id(&d, "art")), Role::Article);
}

#[test]
fn test_explicit_role_overrides_tag() {
    let d = doc("<div id=\"d\" role=\"button\">x</div>\
                 <div id=\"h\" role=\"heading\" aria-level=\"4\">x</div>");
    assert_eq!(resolve_role(&d, by_id(&d, "d")), Role::Button);
    assert_eq!(resolve_role(&d, by_id(&d, "h")), Role::Heading(4));
}

// =============================================================================
// Accessible names
// =============================================================================

#[test]
fn test_name_priority_aria_label_beats_text() {
    let d = doc("<button id=\"b\" aria-label=\"Close dialog\">X</button>");
    let labels = LabelMap::build(&d);
    assert_eq!(accessible_name(&d, by_id(&d, "b"), &labels), "Close dialog");
}

#[test]
fn test_name_from_aria_labelledby() {
    let d = doc(
        "<span id=\"s1\">Billing</span><span id=\"s2\">Address</span>\
         <input id=\"i\" aria-labelledby=\"s1 s2\">",
    );
    let labels = LabelMap::build(&d);
    assert_eq!(
        accessible_name(&d, by_id(&d, "i"), &labels),
        "Billing Address"
    );
}

#[test]
fn test_name_from_label_for() {
    let d = doc("<label for=\"e\">Email</label><input id=\"e\">");
    let labels = LabelMap::build(&d);
    assert_eq!(accessible_name(&d, by_id(&d, "e"), &labels), "Email");
}

#[test]
fn test_name_from_ancestor_label() {
    let d = doc("<label>Remember me <input id=\"c\" type=\"checkbox\"></label>");
    let labels = LabelMap::build(&d);
    assert_eq!(accessible_name(&d, by_id(&d, "c"), &labels), "Remember me");
}

#[test]
fn test_name_falls_back_through_placeholder_and_title() {
    let d = doc("<input id=\"p\" placeholder=\"Search…\"><input id=\"t\" title=\"Quantity\">");
    let labels = LabelMap::build(&d);
    assert_eq!(accessible_name(&d, by_id(&d, "p"), &labels), "Search…");
    assert_eq!(accessible_name(&d, by_id(&d, "t"), &labels), "Quantity");
}

#[test]
fn test_name_from_submit_value() {
    let d = doc("<input id=\"s\" type=\"submit\" value=\"Send\">");
    let labels = LabelMap::build(&d);
    assert_eq!(accessible_name(&d, by_id(&d, "s"), &labels), "Send");
}

// =============================================================================
// State flags and visibility
// =============================================================================

#[test]
fn test_state_flags_read_idl_and_aria() {
    let d = doc("<input id=\"x\" type=\"checkbox\" checked required disabled aria-expanded=\"true\">");
    let state = state_flags(&d, by_id(&d, "x"));
    assert!(state.checked);
    assert!(state.required);
    assert!(state.disabled);
    assert!(state.expanded);
    assert!(!state.selected);
    assert_eq!(
        state.list(),
        vec!["disabled", "required", "checked", "expanded"]
    );
}

#[test]
fn test_visibility_chain() {
    let d = doc(
        "<div id=\"wrapper\" style=\"display:none\"><p id=\"inside\">x</p></div>\
         <p id=\"faded\" style=\"opacity:0\">y</p>\
         <div aria-hidden=\"true\"><p id=\"aria\">z</p></div>\
         <p id=\"shown\">ok</p>",
    );
    assert!(!is_visible(&d, by_id(&d, "inside")));
    assert!(!is_visible(&d, by_id(&d, "faded")));
    assert!(!is_visible(&d, by_id(&d, "aria")));
    assert!(is_visible(&d, by_id(&d, "shown")));
}

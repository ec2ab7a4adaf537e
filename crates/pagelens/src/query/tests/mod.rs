//! Unit tests for selector resolution

use crate::dom::Document;
use crate::query::{SelectorKind, classify, resolve_all, resolve_first};
use crate::snapshot::RefMap;

fn doc(html: &str) -> Document {
    Document::parse(html, "https://example.com/")
}

fn empty_refs() -> RefMap {
    RefMap::new()
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_classify_prefixes() {
    assert_eq!(classify("@ref:0"), SelectorKind::Ref);
    assert_eq!(classify("/main/article"), SelectorKind::XPath);
    assert_eq!(classify("//button"), SelectorKind::XPath);
    assert_eq!(classify("#submit"), SelectorKind::Css);
    assert_eq!(classify("div.card > a"), SelectorKind::Css);
}

// =============================================================================
// CSS
// =============================================================================

#[test]
fn test_css_by_id_and_class() {
    let d = doc("<div id=\"x\" class=\"card wide\">a</div><div class=\"card\">b</div>");
    let refs = empty_refs();

    let by_id = resolve_first(&d, &refs, "#x").expect("id match");
    assert_eq!(d.attr(by_id, "id"), Some("x"));

    let by_class = resolve_all(&d, &refs, ".card");
    assert_eq!(by_class.len(), 2);

    assert_eq!(resolve_all(&d, &refs, ".wide").len(), 1);
}

#[test]
fn test_css_attribute_operators() {
    let d = doc("<a href=\"https://rust-lang.org/learn\">x</a>");
    let refs = empty_refs();
    assert!(resolve_first(&d, &refs, "a[href]").is_some());
    assert!(resolve_first(&d, &refs, "a[href^='https://']").is_some());
    assert!(resolve_first(&d, &refs, "a[href$='learn']").is_some());
    assert!(resolve_first(&d, &refs, "a[href*='rust']").is_some());
    assert!(resolve_first(&d, &refs, "a[href='nope']").is_none());
}

#[test]
fn test_css_descendant_and_child_combinators() {
    let d = doc("<div id=\"outer\"><section><p id=\"deep\">x</p></section></div>");
    let refs = empty_refs();

    assert!(resolve_first(&d, &refs, "div p").is_some());
    assert!(resolve_first(&d, &refs, "div > p").is_none());
    assert!(resolve_first(&d, &refs, "section > p").is_some());
}

#[test]
fn test_css_comma_groups_resolve_in_document_order() {
    let d = doc("<span id=\"a\">x</span><em id=\"b\">y</em>");
    let refs = empty_refs();
    let all = resolve_all(&d, &refs, "em, span");
    assert_eq!(all.len(), 2);
    assert_eq!(d.attr(all[0], "id"), Some("a"));
}

#[test]
fn test_css_unsupported_syntax_resolves_to_nothing() {
    let d = doc("<p>x</p>");
    let refs = empty_refs();
    assert!(resolve_first(&d, &refs, "p:hover").is_none());
    assert!(resolve_all(&d, &refs, "p::before").is_empty());
}

// =============================================================================
// XPath
// =============================================================================

#[test]
fn test_xpath_rooted_path() {
    let d = doc("<main><article><h2>B</h2></article></main>");
    let refs = empty_refs();
    let article = resolve_first(&d, &refs, "/main/article").expect("article");
    assert_eq!(d.tag(article), Some("article"));
}

#[test]
fn test_xpath_descendant_step() {
    let d = doc("<div><span><button>x</button></span></div>");
    let refs = empty_refs();
    let button = resolve_first(&d, &refs, "//button").expect("button");
    assert_eq!(d.tag(button), Some("button"));
}

#[test]
fn test_xpath_positional_predicate() {
    let d = doc("<ul><li>a</li><li>b</li><li>c</li></ul>");
    let refs = empty_refs();
    let second = resolve_first(&d, &refs, "/ul/li[2]").expect("second item");
    assert_eq!(d.text_content(second), "b");
}

#[test]
fn test_xpath_attribute_predicates() {
    let d = doc("<div id=\"content\"><div id=\"other\"></div></div>");
    let refs = empty_refs();
    let hit = resolve_first(&d, &refs, "//div[@id='content']").expect("div");
    assert_eq!(d.attr(hit, "id"), Some("content"));
    assert!(resolve_first(&d, &refs, "//div[@data-x]").is_none());
}

#[test]
fn test_xpath_union_first_branch_wins() {
    let d = doc("<main>x</main>");
    let refs = empty_refs();
    let hit = resolve_first(&d, &refs, "/nav | /main").expect("main via union");
    assert_eq!(d.tag(hit), Some("main"));
}

#[test]
fn test_xpath_union_concatenates_for_all() {
    let d = doc("<h1>a</h1><p>b</p>");
    let refs = empty_refs();
    let all = resolve_all(&d, &refs, "//h1 | //p");
    assert_eq!(all.len(), 2);
}

#[test]
fn test_xpath_invalid_resolves_to_nothing() {
    let d = doc("<p>x</p>");
    let refs = empty_refs();
    assert!(resolve_first(&d, &refs, "/p[").is_none());
    assert!(resolve_first(&d, &refs, "/p[0]").is_none());
    assert!(resolve_all(&d, &refs, "/!bad").is_empty());
}

// =============================================================================
// Refs
// =============================================================================

#[test]
fn test_ref_resolution_through_map() {
    let d = doc("<button>x</button>");
    let button = d.find_first("button").expect("button");
    let mut refs = empty_refs();
    let handle = refs.generate(button);

    assert_eq!(resolve_first(&d, &refs, &handle.to_string()), Some(button));
    assert!(resolve_first(&d, &refs, "@ref:99").is_none());
    assert!(resolve_first(&d, &refs, "@ref:oops").is_none());
}

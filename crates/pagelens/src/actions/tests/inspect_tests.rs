//! Tests for the introspection executors

use serde_json::json;

use super::{by_id, page};
use crate::actions::{
    Action, ErrorCode, ExtractAction, GetAttributeAction, GetBoundingBoxAction, GetPropertyAction,
    GetTextAction, IsCheckedAction, IsEnabledAction, IsVisibleAction, QuerySelectorAction,
    QuerySelectorAllAction, SnapshotAction,
};
use crate::dom::Rect;

#[tokio::test]
async fn test_query_selector_found_describes_element() {
    let mut page = page("<button id=\"go\">Go</button>");
    let data = QuerySelectorAction::new()
        .execute(&json!({"selector": "#go"}), &mut page)
        .await
        .expect("query runs");
    assert_eq!(data["found"], json!(true));
    assert_eq!(data["element"]["tag"], json!("button"));
    assert_eq!(data["element"]["role"], json!("button"));
    assert!(data["element"]["ref"].as_str().is_some_and(|r| r.starts_with("@ref:")));
}

#[tokio::test]
async fn test_query_selector_absence_is_not_an_error() {
    let mut page = page("<p>x</p>");
    let data = QuerySelectorAction::new()
        .execute(&json!({"selector": "#ghost"}), &mut page)
        .await
        .expect("absence is reported");
    assert_eq!(data["found"], json!(false));
}

#[tokio::test]
async fn test_query_selector_all_counts_matches() {
    let mut page = page("<li>a</li><li>b</li><li>c</li>");
    let data = QuerySelectorAllAction::new()
        .execute(&json!({"selector": "li"}), &mut page)
        .await
        .expect("query runs");
    assert_eq!(data["count"], json!(3));
    assert_eq!(data["elements"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_get_text_collapses_whitespace() {
    let mut page = page("<p id=\"p\">  a \n  b  </p>");
    let data = GetTextAction::new()
        .execute(&json!({"selector": "#p"}), &mut page)
        .await
        .expect("getText runs");
    assert_eq!(data["text"], json!("a b"));
}

#[tokio::test]
async fn test_get_attribute_null_when_absent() {
    let mut page = page("<a id=\"l\" href=\"/x\">y</a>");
    let action = GetAttributeAction::new();

    let present = action
        .execute(&json!({"selector": "#l", "name": "href"}), &mut page)
        .await
        .expect("attribute read");
    assert_eq!(present["value"], json!("/x"));

    let absent = action
        .execute(&json!({"selector": "#l", "name": "target"}), &mut page)
        .await
        .expect("attribute read");
    assert_eq!(absent["value"], json!(null));
}

#[tokio::test]
async fn test_get_property_reads_idl_state() {
    let mut page = page("<input id=\"e\" value=\"seed\">");
    let action = GetPropertyAction::new();

    let value = action
        .execute(&json!({"selector": "#e", "name": "value"}), &mut page)
        .await
        .expect("property read");
    assert_eq!(value["value"], json!("seed"));

    let tag = action
        .execute(&json!({"selector": "#e", "name": "tagName"}), &mut page)
        .await
        .expect("property read");
    assert_eq!(tag["value"], json!("INPUT"));

    let unknown = action
        .execute(&json!({"selector": "#e", "name": "mystery"}), &mut page)
        .await
        .expect("property read");
    assert_eq!(unknown["value"], json!(null));
}

#[tokio::test]
async fn test_get_bounding_box_returns_rect_verbatim() {
    let mut page = page("<button id=\"b\">X</button>");
    let button = by_id(&page, "b");
    page.document
        .set_layout_rect(button, Rect::new(5.0, 6.0, 70.0, 20.0));

    let data = GetBoundingBoxAction::new()
        .execute(&json!({"selector": "#b"}), &mut page)
        .await
        .expect("box read");
    assert_eq!(data["x"], json!(5.0));
    assert_eq!(data["y"], json!(6.0));
    assert_eq!(data["width"], json!(70.0));
    assert_eq!(data["height"], json!(20.0));
}

#[tokio::test]
async fn test_is_visible_and_is_enabled() {
    let mut page = page(
        "<p id=\"hidden\" style=\"display:none\">x</p>\
         <button id=\"off\" disabled>X</button>",
    );

    let visible = IsVisibleAction::new()
        .execute(&json!({"selector": "#hidden"}), &mut page)
        .await
        .expect("isVisible runs");
    assert_eq!(visible["visible"], json!(false));

    let enabled = IsEnabledAction::new()
        .execute(&json!({"selector": "#off"}), &mut page)
        .await
        .expect("isEnabled runs");
    assert_eq!(enabled["enabled"], json!(false));
}

#[tokio::test]
async fn test_is_checked_requires_checkable() {
    let mut page = page("<input id=\"c\" type=\"checkbox\" checked><p id=\"p\">x</p>");

    let checked = IsCheckedAction::new()
        .execute(&json!({"selector": "#c"}), &mut page)
        .await
        .expect("isChecked runs");
    assert_eq!(checked["checked"], json!(true));

    let error = IsCheckedAction::new()
        .execute(&json!({"selector": "#p"}), &mut page)
        .await
        .expect_err("paragraphs have no checked state");
    assert_eq!(error.code, ErrorCode::ElementNotCompatible);
}

#[tokio::test]
async fn test_snapshot_action_stores_last_snapshot() {
    let mut page = page("<button>Go</button>");
    let data = SnapshotAction::new()
        .execute(&json!({}), &mut page)
        .await
        .expect("snapshot runs");

    assert!(data["tree"].as_str().is_some_and(|t| t.contains("BUTTON")));
    assert_eq!(data["metadata"]["mode"], json!("interactive"));
    assert!(page.last_snapshot.is_some());
    assert_eq!(page.refs.len(), 1);
}

#[tokio::test]
async fn test_snapshot_action_missing_root_fails() {
    let mut page = page("<p>x</p>");
    let error = SnapshotAction::new()
        .execute(&json!({"root": "#ghost"}), &mut page)
        .await
        .expect_err("root selector resolves to nothing");
    assert_eq!(error.code, ErrorCode::ElementNotFound);
}

#[tokio::test]
async fn test_extract_action_forces_extract_mode() {
    let mut page = page("<h1>Doc</h1>");
    let data = ExtractAction::new()
        .execute(&json!({"mode": "interactive"}), &mut page)
        .await
        .expect("extract runs");
    assert_eq!(data["metadata"]["mode"], json!("extract"));
    assert!(data["tree"].as_str().is_some_and(|t| t.contains("# Doc")));
}

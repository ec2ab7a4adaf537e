//! Tests for the control executors: wait, evaluate, validation, highlight

use serde_json::json;

use super::{page, snapshot_refs};
use crate::actions::{
    Action, ErrorCode, EvaluateAction, HighlightAction, ValidateElementAction, ValidateRefsAction,
    WaitAction,
};

// =============================================================================
// Wait
// =============================================================================

#[tokio::test]
async fn test_wait_visible_succeeds_immediately() {
    let mut page = page("<p id=\"x\">hi</p>");
    let data = WaitAction::new()
        .execute(&json!({"selector": "#x", "state": "visible"}), &mut page)
        .await
        .expect("already visible");
    assert_eq!(data["state"], json!("visible"));
}

#[tokio::test]
async fn test_wait_detached_succeeds_for_missing_selector() {
    let mut page = page("<p>hi</p>");
    WaitAction::new()
        .execute(&json!({"selector": "#gone", "state": "detached"}), &mut page)
        .await
        .expect("nothing matches, so detached holds");
}

#[tokio::test]
async fn test_wait_hidden_matches_styled_out_element() {
    let mut page = page("<p id=\"x\" style=\"display:none\">hi</p>");
    WaitAction::new()
        .execute(&json!({"selector": "#x", "state": "hidden"}), &mut page)
        .await
        .expect("display:none is hidden");
}

#[tokio::test]
async fn test_wait_timeout_reports_last_observed_state() {
    let mut page = page("<p>hi</p>");
    let error = WaitAction::new()
        .execute(
            &json!({"selector": "#never", "state": "visible", "timeout": 60}),
            &mut page,
        )
        .await
        .expect_err("selector never appears");

    assert_eq!(error.code, ErrorCode::Timeout);
    let context = error.context.expect("context");
    assert_eq!(context.last_state.as_deref(), Some("detached"));
}

#[tokio::test]
async fn test_wait_enabled_observes_disabled_element() {
    let mut page = page("<button id=\"b\" disabled>X</button>");
    let error = WaitAction::new()
        .execute(
            &json!({"selector": "#b", "state": "enabled", "timeout": 60}),
            &mut page,
        )
        .await
        .expect_err("stays disabled");
    let context = error.context.expect("context");
    assert!(
        context.last_state.as_deref().is_some_and(|s| s.contains("disabled")),
        "{context:?}"
    );
}

// =============================================================================
// Evaluate
// =============================================================================

#[tokio::test]
async fn test_evaluate_literals() {
    let mut page = page("<p>x</p>");
    let action = EvaluateAction::new();

    let number = action
        .execute(&json!({"expression": "42"}), &mut page)
        .await
        .expect("number literal");
    assert_eq!(number, json!(42.0));

    let string = action
        .execute(&json!({"expression": "'hi'"}), &mut page)
        .await
        .expect("string literal");
    assert_eq!(string, json!("hi"));

    let boolean = action
        .execute(&json!({"expression": "true"}), &mut page)
        .await
        .expect("bool literal");
    assert_eq!(boolean, json!(true));
}

#[tokio::test]
async fn test_evaluate_document_scope() {
    let mut page = crate::page::PageState::from_html(
        "<html><head><title>Docs</title></head><body></body></html>",
        "https://example.com/docs",
    );
    let title = EvaluateAction::new()
        .execute(&json!({"expression": "document.title"}), &mut page)
        .await
        .expect("document.title");
    assert_eq!(title, json!("Docs"));

    let url = EvaluateAction::new()
        .execute(&json!({"expression": "document.url"}), &mut page)
        .await
        .expect("document.url");
    assert_eq!(url, json!("https://example.com/docs"));
}

#[tokio::test]
async fn test_evaluate_element_scope() {
    let mut page = page("<input id=\"e\" value=\"seed\">");
    let value = EvaluateAction::new()
        .execute(
            &json!({"expression": "element.value", "selector": "#e"}),
            &mut page,
        )
        .await
        .expect("element.value");
    assert_eq!(value, json!("seed"));
}

#[tokio::test]
async fn test_evaluate_positional_args() {
    let mut page = page("<p>x</p>");
    let value = EvaluateAction::new()
        .execute(
            &json!({"expression": "args[1]", "args": ["zero", "one"]}),
            &mut page,
        )
        .await
        .expect("args binding");
    assert_eq!(value, json!("one"));
}

#[tokio::test]
async fn test_evaluate_element_without_selector_fails() {
    let mut page = page("<p>x</p>");
    let error = EvaluateAction::new()
        .execute(&json!({"expression": "element.value"}), &mut page)
        .await
        .expect_err("no element bound");
    assert_eq!(error.code, ErrorCode::InvalidParameters);
}

#[tokio::test]
async fn test_evaluate_unknown_identifier_fails() {
    let mut page = page("<p>x</p>");
    let error = EvaluateAction::new()
        .execute(&json!({"expression": "window.location"}), &mut page)
        .await
        .expect_err("no window identifier");
    assert_eq!(error.code, ErrorCode::InvalidParameters);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_validate_element_compatible() {
    let mut page = page("<button id=\"b\">Go</button>");
    let data = ValidateElementAction::new()
        .execute(
            &json!({"selector": "#b", "requirement": "clickable"}),
            &mut page,
        )
        .await
        .expect("validation runs");
    assert_eq!(data["compatible"], json!(true));
    assert_eq!(data["actualRole"], json!("button"));
    assert_eq!(data["state"]["attached"], json!(true));
}

#[tokio::test]
async fn test_validate_element_incompatible_carries_suggestion() {
    let mut page = page("<button id=\"b\">Go</button>");
    let data = ValidateElementAction::new()
        .execute(
            &json!({"selector": "#b", "requirement": "editable"}),
            &mut page,
        )
        .await
        .expect("validation runs");
    assert_eq!(data["compatible"], json!(false));
    assert!(data["suggestion"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn test_validate_element_unknown_requirement() {
    let mut page = page("<button id=\"b\">Go</button>");
    let error = ValidateElementAction::new()
        .execute(
            &json!({"selector": "#b", "requirement": "levitation"}),
            &mut page,
        )
        .await
        .expect_err("unknown requirement");
    assert_eq!(error.code, ErrorCode::InvalidParameters);
}

#[tokio::test]
async fn test_validate_refs_partitions_disjointly() {
    let mut page = page("<button>One</button><button>Two</button>");
    snapshot_refs(&mut page);

    // Remove the element behind @ref:0
    let first = page.refs.lookup("@ref:0").expect("ref 0");
    page.document.remove(first);

    let data = ValidateRefsAction::new()
        .execute(
            &json!({"refs": ["@ref:0", "@ref:1", "@ref:9", "bogus"]}),
            &mut page,
        )
        .await
        .expect("validation runs");

    assert_eq!(data["valid"], json!(["@ref:1"]));
    let invalid = data["invalid"].as_array().expect("invalid array");
    assert_eq!(invalid.len(), 3);
    assert_eq!(
        invalid[0]["reason"],
        json!("Element has been removed from the DOM")
    );
    assert_eq!(invalid[1]["reason"], json!("Ref not found"));
    assert_eq!(invalid[2]["reason"], json!("Ref not found"));
}

// =============================================================================
// Highlight
// =============================================================================

#[tokio::test]
async fn test_highlight_requires_a_snapshot() {
    let mut page = page("<button>X</button>");
    let error = HighlightAction::new()
        .execute(&json!({}), &mut page)
        .await
        .expect_err("no snapshot yet");
    assert_eq!(error.code, ErrorCode::InvalidParameters);
}

#[tokio::test]
async fn test_validate_element_missing_selector_is_not_found() {
    let mut page = page("<p>x</p>");
    let error = ValidateElementAction::new()
        .execute(&json!({"selector": "#ghost"}), &mut page)
        .await
        .expect_err("missing element");
    assert_eq!(error.code, ErrorCode::ElementNotFound);
}

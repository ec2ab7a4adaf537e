//! Unit tests for command dispatch

use serde_json::{Value, json};

use crate::actions::ErrorCode;
use crate::dispatch::{Command, CommandDispatcher, Response};
use crate::page::PageState;

fn page(html: &str) -> PageState {
    PageState::from_html(html, "https://example.com/")
}

fn serialized(response: &Response) -> Value {
    serde_json::to_value(response).expect("responses serialize")
}

#[tokio::test]
async fn test_id_is_echoed() {
    let mut page = page("<p>x</p>");
    let mut dispatcher = CommandDispatcher::new();
    let response = dispatcher
        .dispatch(Command::new("snapshot").with_id(json!(42)), &mut page)
        .await;
    assert!(response.success);
    assert_eq!(response.id, json!(42));
}

#[tokio::test]
async fn test_missing_id_is_assigned() {
    let mut page = page("<p>x</p>");
    let mut dispatcher = CommandDispatcher::new();
    let first = dispatcher.dispatch(Command::new("snapshot"), &mut page).await;
    let second = dispatcher.dispatch(Command::new("snapshot"), &mut page).await;

    let first_id = first.id.as_str().expect("string id").to_string();
    let second_id = second.id.as_str().expect("string id").to_string();
    assert!(first_id.starts_with("cmd-"));
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_unknown_action_fails_terminally() {
    let mut page = page("<p>x</p>");
    let mut dispatcher = CommandDispatcher::new();
    let response = dispatcher
        .dispatch(Command::new("teleport"), &mut page)
        .await;
    assert!(!response.success);
    assert_eq!(response.error_code, Some(ErrorCode::InvalidParameters));
    assert!(response.error.as_deref().is_some_and(|e| e.contains("teleport")));
}

#[tokio::test]
async fn test_malformed_payload_never_throws() {
    let mut page = page("<p>x</p>");
    let mut dispatcher = CommandDispatcher::new();
    let response = dispatcher
        .dispatch_value(json!({"selector": "#x"}), &mut page)
        .await;
    assert!(!response.success, "missing action tag");
    assert_eq!(response.id, Value::Null);
}

#[tokio::test]
async fn test_snapshot_then_click_by_ref() {
    let mut page = page("<button>Go</button>");
    let mut dispatcher = CommandDispatcher::new();

    let snapshot = dispatcher.dispatch(Command::new("snapshot"), &mut page).await;
    assert!(snapshot.success);
    let tree = snapshot.data.as_ref().expect("data")["tree"]
        .as_str()
        .expect("tree")
        .to_string();
    assert!(tree.contains("BUTTON \"Go\" @ref:0"), "{tree}");

    let click = dispatcher
        .dispatch(
            Command::new("click").arg("selector", json!("@ref:0")),
            &mut page,
        )
        .await;
    assert!(click.success);
    assert_eq!(click.data.expect("data")["connected"], json!(true));
}

#[tokio::test]
async fn test_not_found_error_carries_recovery_context() {
    let mut page = page("<button>One</button><input id=\"email\">");
    let mut dispatcher = CommandDispatcher::new();
    let response = dispatcher
        .dispatch(
            Command::new("click").arg("selector", json!("#missing")),
            &mut page,
        )
        .await;

    assert!(!response.success);
    assert_eq!(response.error_code, Some(ErrorCode::ElementNotFound));
    let context = response.error_context.expect("context");
    assert!(context.nearby_elements.len() <= 5);
    assert!(context.similar_selectors.len() <= 3);
    assert!(!response.suggestions.is_empty());
}

#[tokio::test]
async fn test_response_serialization_shape() {
    let mut page = page("<p>x</p>");
    let mut dispatcher = CommandDispatcher::new();

    let failure = dispatcher
        .dispatch(
            Command::new("click").arg("selector", json!("#nope")),
            &mut page,
        )
        .await;
    let value = serialized(&failure);
    assert_eq!(value["success"], json!(false));
    assert_eq!(value["errorCode"], json!("ELEMENT_NOT_FOUND"));
    assert!(value.get("data").is_none(), "no data field on failure");

    let success = dispatcher.dispatch(Command::new("snapshot"), &mut page).await;
    let value = serialized(&success);
    assert_eq!(value["success"], json!(true));
    assert!(value.get("error").is_none(), "no error field on success");
}

#[tokio::test]
async fn test_highlight_lifecycle_through_dispatcher() {
    let mut page = page("<button>Go</button>");
    let mut dispatcher = CommandDispatcher::new();

    let premature = dispatcher.dispatch(Command::new("highlight"), &mut page).await;
    assert!(!premature.success, "highlight requires a snapshot");

    assert!(dispatcher.dispatch(Command::new("snapshot"), &mut page).await.success);
    assert!(dispatcher.dispatch(Command::new("highlight"), &mut page).await.success);

    // clearHighlight is idempotent
    assert!(dispatcher.dispatch(Command::new("clearHighlight"), &mut page).await.success);
    assert!(dispatcher.dispatch(Command::new("clearHighlight"), &mut page).await.success);
}

#[test]
fn test_dispatcher_enumerates_command_surface() {
    let dispatcher = CommandDispatcher::new();
    let actions = dispatcher.actions();
    let names: Vec<&str> = actions.iter().map(|(name, _)| *name).collect();

    for expected in [
        "click",
        "dblclick",
        "type",
        "fill",
        "clear",
        "check",
        "uncheck",
        "select",
        "focus",
        "blur",
        "hover",
        "scroll",
        "scrollIntoView",
        "press",
        "keyDown",
        "keyUp",
        "snapshot",
        "extract",
        "querySelector",
        "querySelectorAll",
        "getText",
        "getAttribute",
        "getProperty",
        "getBoundingBox",
        "isVisible",
        "isEnabled",
        "isChecked",
        "wait",
        "evaluate",
        "validateElement",
        "validateRefs",
        "highlight",
        "clearHighlight",
    ] {
        assert!(names.contains(&expected), "missing action {expected}");
    }
    assert_eq!(names.len(), 33);
}

//! Unit tests for synthetic event dispatch

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::dom::{Document, Event, EventType};

fn doc(html: &str) -> Document {
    Document::parse(html, "https://example.com/")
}

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

#[test]
fn test_listener_fires_once_per_dispatch() {
    let mut d = doc("<button>Go</button>");
    let button = d.find_first("button").expect("button");
    let hits = counter();
    let hits_inner = Arc::clone(&hits);
    d.add_event_listener(button, EventType::Click, move |_, _| {
        hits_inner.fetch_add(1, Ordering::SeqCst);
    });

    d.dispatch(Event::new(EventType::Click, button));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_click_bubbles_to_ancestors() {
    let mut d = doc("<div><button>Go</button></div>");
    let div = d.find_first("div").expect("div");
    let button = d.find_first("button").expect("button");
    let hits = counter();
    let hits_inner = Arc::clone(&hits);
    d.add_event_listener(div, EventType::Click, move |_, _| {
        hits_inner.fetch_add(1, Ordering::SeqCst);
    });

    d.dispatch(Event::new(EventType::Click, button));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_mouseenter_does_not_bubble() {
    let mut d = doc("<div><button>Go</button></div>");
    let div = d.find_first("div").expect("div");
    let button = d.find_first("button").expect("button");
    let hits = counter();
    let hits_inner = Arc::clone(&hits);
    d.add_event_listener(div, EventType::MouseEnter, move |_, _| {
        hits_inner.fetch_add(1, Ordering::SeqCst);
    });

    d.dispatch(Event::new(EventType::MouseEnter, button));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_listener_may_remove_its_own_target() {
    let mut d = doc("<button>Go</button>");
    let button = d.find_first("button").expect("button");
    d.add_event_listener(button, EventType::Click, move |doc, event| {
        doc.remove(event.target);
    });

    d.dispatch(Event::new(EventType::Click, button));
    assert!(!d.is_connected(button));
}

#[test]
fn test_removed_listener_stops_firing() {
    let mut d = doc("<button>Go</button>");
    let button = d.find_first("button").expect("button");
    let hits = counter();
    let hits_inner = Arc::clone(&hits);
    let token = d.add_event_listener(button, EventType::Click, move |_, _| {
        hits_inner.fetch_add(1, Ordering::SeqCst);
    });

    d.dispatch(Event::new(EventType::Click, button));
    assert!(d.remove_event_listener(token));
    d.dispatch(Event::new(EventType::Click, button));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_checkbox_click_default_action_toggles() {
    let mut d = doc("<input type=\"checkbox\">");
    let checkbox = d.find_first("input").expect("input");
    assert!(!d.is_checked(checkbox));

    d.dispatch(Event::new(EventType::Click, checkbox));
    assert!(d.is_checked(checkbox));

    d.dispatch(Event::new(EventType::Click, checkbox));
    assert!(!d.is_checked(checkbox));
}

#[test]
fn test_disabled_checkbox_ignores_click() {
    let mut d = doc("<input type=\"checkbox\" disabled>");
    let checkbox = d.find_first("input").expect("input");
    d.dispatch(Event::new(EventType::Click, checkbox));
    assert!(!d.is_checked(checkbox));
}

#[test]
fn test_radio_click_clears_group_siblings() {
    let mut d = doc(
        "<form>\
           <input type=\"radio\" name=\"g\" id=\"r1\" checked>\
           <input type=\"radio\" name=\"g\" id=\"r2\">\
           <input type=\"radio\" name=\"other\" id=\"r3\" checked>\
         </form>",
    );
    let by_id = |d: &Document, id: &str| {
        d.all_elements()
            .into_iter()
            .find(|&n| d.attr(n, "id") == Some(id))
            .expect("radio")
    };
    let r2 = by_id(&d, "r2");
    d.dispatch(Event::new(EventType::Click, r2));

    assert!(!d.is_checked(by_id(&d, "r1")), "same group cleared");
    assert!(d.is_checked(by_id(&d, "r2")));
    assert!(d.is_checked(by_id(&d, "r3")), "other group untouched");
}

#[test]
fn test_keyboard_event_carries_key() {
    let mut d = doc("<input>");
    let input = d.find_first("input").expect("input");
    let seen = Arc::new(std::sync::Mutex::new(String::new()));
    let seen_inner = Arc::clone(&seen);
    d.add_event_listener(input, EventType::KeyDown, move |_, event| {
        if let Some(key) = &event.key
            && let Ok(mut guard) = seen_inner.lock()
        {
            guard.push_str(key);
        }
    });

    d.dispatch(Event::new(EventType::KeyDown, input).with_key("Enter"));
    assert_eq!(seen.lock().expect("lock").as_str(), "Enter");
}

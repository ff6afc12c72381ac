#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Notification protocol tests through the AppContext facade.

use apphub_context::notify::{Color, NotificationEvent, NotificationMessage};
use apphub_test_utils::{test_context, test_nav};
use serde_json::json;

#[test]
fn test_alert_error_styling() {
    let fixture = test_context(&test_nav(), "/");
    fixture.context.alert("error", "X");

    let events = fixture.bus.events();
    assert_eq!(events.len(), 1);
    let NotificationEvent::Message(message) = &events[0] else {
        panic!("expected a message event");
    };
    assert_eq!(message.text, "X");
    assert_eq!(message.color, Color::Red);
    assert_eq!(message.icon, "warning");
    assert!(!message.is_persistent);
}

#[test]
fn test_alert_unrecognized_kind_gets_info_styling() {
    let fixture = test_context(&test_nav(), "/");
    fixture.context.alert("bogus", "Y");

    let NotificationEvent::Message(message) = &fixture.bus.events()[0] else {
        panic!("expected a message event");
    };
    assert_eq!(message.color, Color::Blue);
    assert_eq!(message.icon, "info");
}

#[test]
fn test_notify_passes_the_message_through() {
    let fixture = test_context(&test_nav(), "/");

    fixture.context.notify(
        NotificationMessage::new("Calculation starting...", Color::Orange, "rocket")
            .with_action_label("OK")
            .with_action_link("https://example.com")
            .persistent(),
    );

    let NotificationEvent::Message(message) = &fixture.bus.events()[0] else {
        panic!("expected a message event");
    };
    assert_eq!(message.text, "Calculation starting...");
    assert_eq!(message.color, Color::Orange);
    assert!(message.is_persistent);
    assert_eq!(message.action_label.as_deref(), Some("OK"));
    assert_eq!(message.action_link.as_deref(), Some("https://example.com"));
}

#[test]
fn test_clear_all_notifications_payload() {
    let fixture = test_context(&test_nav(), "/");
    fixture.context.clear_all_notifications();

    let events = fixture.bus.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], NotificationEvent::RemoveAll));
    assert_eq!(
        events[0].to_payload(),
        json!({"message": null, "action": "removeAll"})
    );
}

#[test]
fn test_message_payload_envelope() {
    let fixture = test_context(&test_nav(), "/");
    fixture.context.alert("success", "saved");

    let payload = fixture.bus.events()[0].to_payload();
    assert_eq!(
        payload,
        json!({
            "message": {
                "text": "saved",
                "type": "green",
                "icon": "check",
                "isPersistent": false
            }
        })
    );
}

#[test]
fn test_callback_survives_dispatch_but_not_the_wire() {
    use parking_lot::Mutex;
    use std::sync::Arc;

    let fixture = test_context(&test_nav(), "/");
    let clicked = Arc::new(Mutex::new(false));

    let flag = clicked.clone();
    fixture.context.notify(
        NotificationMessage::new("hi", Color::Blue, "info")
            .with_action_callback(move || *flag.lock() = true),
    );

    let NotificationEvent::Message(message) = &fixture.bus.events()[0] else {
        panic!("expected a message event");
    };

    // The renderer can still invoke the callback...
    let callback = message.action_callback.clone().unwrap();
    callback();
    assert!(*clicked.lock());

    // ...but the JSON envelope never carries it.
    let payload = fixture.bus.events()[0].to_payload();
    assert!(payload["message"].get("actionCallback").is_none());
}

#[test]
fn test_events_accumulate_in_order() {
    let fixture = test_context(&test_nav(), "/");

    fixture.context.alert("info", "one");
    fixture.context.alert("error", "two");
    fixture.context.clear_all_notifications();

    let events = fixture.bus.events();
    assert_eq!(events.len(), 3);
    assert!(matches!(&events[0], NotificationEvent::Message(m) if m.text == "one"));
    assert!(matches!(&events[1], NotificationEvent::Message(m) if m.text == "two"));
    assert!(matches!(events[2], NotificationEvent::RemoveAll));
}

//! Cross-app notification protocol.
//!
//! Notifications are fire-and-forget events on a shared bus; rendering
//! is owned by an external consumer (the host chrome's banner and
//! notification list). This module defines the message model, the
//! event envelope host bridges forward, and the bus itself.

mod emitter;

pub use emitter::{InProcessBus, NotificationBus, NotificationEmitter, SubscriptionId};

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Event channel name understood by host-side bridges.
pub const NOTIFY_CHANNEL: &str = "apphub.notify";

/// Action string instructing listeners to clear everything.
pub const REMOVE_ALL_ACTION: &str = "removeAll";

/// Banner color accepted by the notification renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Red,
    Orange,
    Green,
}

/// Callback invoked when the user activates a message's action button.
pub type ActionCallback = Arc<dyn Fn() + Send + Sync>;

/// A single notification for the host's banner/notification UI.
///
/// `action_callback` and `action_link` are both exposed; precedence
/// between them when both are set is defined by the external renderer,
/// not here. The callback is not serializable, so host bridges that
/// forward the JSON envelope drop it.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    /// Message text shown to the user.
    pub text: String,

    /// Banner color.
    #[serde(rename = "type")]
    pub color: Color,

    /// Icon css class name (e.g. "warning", "check", "rocket").
    pub icon: String,

    /// When false the banner dismisses itself after a few seconds.
    pub is_persistent: bool,

    /// Caller-supplied display timestamp (e.g. "9:55 AM").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Text for the optional action button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,

    /// Href the action button navigates to when clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_link: Option<String>,

    /// Callback for the action button.
    #[serde(skip)]
    pub action_callback: Option<ActionCallback>,
}

impl NotificationMessage {
    /// Create a non-persistent message with no action.
    pub fn new(text: impl Into<String>, color: Color, icon: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color,
            icon: icon.into(),
            is_persistent: false,
            timestamp: None,
            action_label: None,
            action_link: None,
            action_callback: None,
        }
    }

    /// Keep the banner up until the user dismisses it.
    pub fn persistent(mut self) -> Self {
        self.is_persistent = true;
        self
    }

    /// Attach a display timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Label the action button.
    pub fn with_action_label(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }

    /// Navigate to `link` when the action button is clicked.
    pub fn with_action_link(mut self, link: impl Into<String>) -> Self {
        self.action_link = Some(link.into());
        self
    }

    /// Invoke `callback` when the action button is clicked.
    pub fn with_action_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action_callback = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for NotificationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationMessage")
            .field("text", &self.text)
            .field("color", &self.color)
            .field("icon", &self.icon)
            .field("is_persistent", &self.is_persistent)
            .field("timestamp", &self.timestamp)
            .field("action_label", &self.action_label)
            .field("action_link", &self.action_link)
            .field("has_action_callback", &self.action_callback.is_some())
            .finish()
    }
}

/// Alert severity accepted by [`NotificationEmitter::alert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Info,
    Success,
}

impl AlertKind {
    /// Case-insensitive parse. Unrecognized kinds yield `None`; the
    /// emitter falls back to the info styling.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.to_uppercase().as_str() {
            "ERROR" => Some(Self::Error),
            "INFO" => Some(Self::Info),
            "SUCCESS" => Some(Self::Success),
            _ => None,
        }
    }

    /// The fixed (color, icon) styling for this kind.
    pub fn style(self) -> (Color, &'static str) {
        match self {
            Self::Error => (Color::Red, "warning"),
            Self::Info => (Color::Blue, "info"),
            Self::Success => (Color::Green, "check"),
        }
    }
}

/// Event dispatched on the notification bus.
#[derive(Debug, Clone)]
pub enum NotificationEvent {
    /// Show a notification.
    Message(NotificationMessage),
    /// Clear all pending and displayed notifications.
    RemoveAll,
}

impl NotificationEvent {
    /// JSON envelope for host bridges listening on [`NOTIFY_CHANNEL`].
    pub fn to_payload(&self) -> Value {
        match self {
            Self::Message(message) => json!({ "message": message }),
            Self::RemoveAll => json!({ "message": null, "action": REMOVE_ALL_ACTION }),
        }
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_wire_names() {
        let message = NotificationMessage::new("Red Alert!", Color::Red, "exclamation-circle")
            .persistent()
            .with_timestamp("9:55 AM")
            .with_action_label("OK")
            .with_action_link("https://example.com");

        let wire = serde_json::to_value(&message).unwrap();
        assert_eq!(
            wire,
            serde_json::json!({
                "text": "Red Alert!",
                "type": "red",
                "icon": "exclamation-circle",
                "isPersistent": true,
                "timestamp": "9:55 AM",
                "actionLabel": "OK",
                "actionLink": "https://example.com"
            })
        );
    }

    #[test]
    fn callback_is_dropped_from_the_wire() {
        let message =
            NotificationMessage::new("hi", Color::Blue, "info").with_action_callback(|| {});

        let wire = serde_json::to_value(&message).unwrap();
        assert!(wire.get("actionCallback").is_none());
        // But the callback survives on the in-process event.
        assert!(message.action_callback.is_some());
    }

    #[test]
    fn optional_fields_are_omitted() {
        let wire = serde_json::to_value(NotificationMessage::new("hi", Color::Green, "check"))
            .unwrap();
        assert!(wire.get("timestamp").is_none());
        assert!(wire.get("actionLabel").is_none());
        assert!(wire.get("actionLink").is_none());
        assert_eq!(wire.get("isPersistent"), Some(&serde_json::json!(false)));
    }

    #[test]
    fn alert_kind_parse_is_case_insensitive() {
        assert_eq!(AlertKind::parse("error"), Some(AlertKind::Error));
        assert_eq!(AlertKind::parse("Success"), Some(AlertKind::Success));
        assert_eq!(AlertKind::parse("INFO"), Some(AlertKind::Info));
        assert_eq!(AlertKind::parse("bogus"), None);
    }

    #[test]
    fn alert_styling_table() {
        assert_eq!(AlertKind::Error.style(), (Color::Red, "warning"));
        assert_eq!(AlertKind::Info.style(), (Color::Blue, "info"));
        assert_eq!(AlertKind::Success.style(), (Color::Green, "check"));
    }

    #[test]
    fn remove_all_payload_shape() {
        let payload = NotificationEvent::RemoveAll.to_payload();
        assert_eq!(
            payload,
            serde_json::json!({ "message": null, "action": "removeAll" })
        );
    }

    #[test]
    fn message_payload_wraps_the_message() {
        let event =
            NotificationEvent::Message(NotificationMessage::new("hi", Color::Blue, "info"));
        let payload = event.to_payload();
        assert_eq!(payload["message"]["text"], "hi");
        assert!(payload.get("action").is_none());
    }
}

//! Notification bus and emitter.
//!
//! Dispatch walks subscribers synchronously in registration order; a
//! subscriber cannot stop delivery to the others, and there is no
//! acknowledgement. Delivery is only as synchronous as someone
//! listening.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{AlertKind, Color, NotificationEvent, NotificationMessage};

/// Handle identifying a bus subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

/// Broadcast channel for notification events.
///
/// Hosts may bridge this onto their own event system; [`InProcessBus`]
/// is the bundled synchronous implementation.
pub trait NotificationBus: Send + Sync {
    /// Deliver an event to every current listener.
    fn dispatch(&self, event: &NotificationEvent);
}

type Subscriber = Box<dyn Fn(&NotificationEvent) + Send + Sync>;

/// Synchronous in-process notification bus.
///
/// The subscriber list is read-locked for the duration of a dispatch:
/// listeners must not subscribe or unsubscribe from inside a callback.
#[derive(Default)]
pub struct InProcessBus {
    subscribers: RwLock<Vec<(SubscriptionId, Subscriber)>>,
}

impl InProcessBus {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; returns a handle for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&NotificationEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::now_v7());
        self.subscribers.write().push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Unknown handles are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.write().retain(|(sid, _)| *sid != id);
    }

    /// Number of current listeners.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl NotificationBus for InProcessBus {
    fn dispatch(&self, event: &NotificationEvent) {
        let subscribers = self.subscribers.read();
        for (_, listener) in subscribers.iter() {
            listener(event);
        }
        debug!(listeners = subscribers.len(), "notification dispatched");
    }
}

/// Emits notification protocol events onto the shared bus.
pub struct NotificationEmitter {
    bus: Arc<dyn NotificationBus>,
}

impl NotificationEmitter {
    /// Create an emitter over a bus.
    pub fn new(bus: Arc<dyn NotificationBus>) -> Self {
        Self { bus }
    }

    /// Broadcast a notification. Fire-and-forget.
    pub fn notify(&self, message: NotificationMessage) {
        self.bus.dispatch(&NotificationEvent::Message(message));
    }

    /// Broadcast a simple non-persistent alert.
    ///
    /// `kind` is matched case-insensitively against error/info/success;
    /// anything else gets the info styling.
    pub fn alert(&self, kind: &str, text: &str) {
        let (color, icon) = AlertKind::parse(kind)
            .map(AlertKind::style)
            .unwrap_or((Color::Blue, "info"));
        self.notify(NotificationMessage::new(text, color, icon));
    }

    /// Instruct listeners to clear all pending and displayed
    /// notifications.
    pub fn clear_all(&self) {
        self.bus.dispatch(&NotificationEvent::RemoveAll);
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn dispatch_reaches_listeners_in_order() {
        let bus = InProcessBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = seen.clone();
        bus.subscribe(move |_| first.lock().push("first"));
        let second = seen.clone();
        bus.subscribe(move |_| second.lock().push("second"));

        bus.dispatch(&NotificationEvent::RemoveAll);
        assert_eq!(*seen.lock(), ["first", "second"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let bus = InProcessBus::new();
        let count = Arc::new(Mutex::new(0));

        let counter = count.clone();
        let id = bus.subscribe(move |_| *counter.lock() += 1);
        assert_eq!(bus.subscriber_count(), 1);

        bus.dispatch(&NotificationEvent::RemoveAll);
        bus.unsubscribe(id);
        bus.dispatch(&NotificationEvent::RemoveAll);

        assert_eq!(*count.lock(), 1);
        assert_eq!(bus.subscriber_count(), 0);

        // Unknown handles are ignored.
        bus.unsubscribe(id);
    }

    #[test]
    fn dispatch_without_listeners_is_a_no_op() {
        let bus = InProcessBus::new();
        bus.dispatch(&NotificationEvent::RemoveAll);
    }

    #[test]
    fn alert_maps_kinds_to_styling() {
        let bus = Arc::new(InProcessBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe(move |event| {
            if let NotificationEvent::Message(message) = event {
                sink.lock()
                    .push((message.color, message.icon.clone(), message.is_persistent));
            }
        });

        let emitter = NotificationEmitter::new(bus);
        emitter.alert("error", "X");
        emitter.alert("INFO", "Y");
        emitter.alert("success", "Z");
        emitter.alert("bogus", "W");

        assert_eq!(
            *seen.lock(),
            [
                (Color::Red, "warning".to_string(), false),
                (Color::Blue, "info".to_string(), false),
                (Color::Green, "check".to_string(), false),
                (Color::Blue, "info".to_string(), false),
            ]
        );
    }

    #[test]
    fn clear_all_dispatches_remove_all() {
        let bus = Arc::new(InProcessBus::new());
        let cleared = Arc::new(Mutex::new(false));

        let flag = cleared.clone();
        bus.subscribe(move |event| {
            if matches!(event, NotificationEvent::RemoveAll) {
                *flag.lock() = true;
            }
        });

        NotificationEmitter::new(bus).clear_all();
        assert!(*cleared.lock());
    }
}

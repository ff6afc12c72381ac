//! Apphub test utilities.
//!
//! Helpers for integration testing: a navigation fixture builder that
//! produces the host's JSON shape, a collecting notification bus for
//! asserting on dispatched events, and a pre-wired context fixture.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Map, Value, json};

use apphub_context::AppContext;
use apphub_context::nav::{NavigationTree, StaticNavigation};
use apphub_context::notify::{NotificationBus, NotificationEvent};
use apphub_context::store::MemoryStore;

/// Create a navigation builder with no regions or paths.
pub fn test_nav() -> NavBuilder {
    NavBuilder::default()
}

/// Builder producing the host page's navigation JSON shape.
///
/// Trees built here go through `NavigationTree::from_value`, the same
/// ingestion path a real host object takes.
#[derive(Debug, Clone, Default)]
pub struct NavBuilder {
    regions: Vec<(String, Vec<String>)>,
    paths: Map<String, Value>,
    context_path: Option<String>,
    preferred_locale: Option<String>,
    extra: Map<String, Value>,
}

impl NavBuilder {
    /// Append an item to a region, creating the region at the current
    /// position if it is new. Region order is insertion order.
    pub fn with_item(mut self, region: &str, item_id: &str) -> Self {
        match self.regions.iter_mut().find(|(name, _)| name == region) {
            Some((_, items)) => items.push(item_id.to_string()),
            None => self
                .regions
                .push((region.to_string(), vec![item_id.to_string()])),
        }
        self
    }

    /// Map an app id to its URL path prefix.
    pub fn with_path(mut self, app_id: &str, prefix: &str) -> Self {
        self.paths.insert(app_id.to_string(), json!(prefix));
        self
    }

    /// Set the multi-tenant context path.
    pub fn with_context_path(mut self, path: &str) -> Self {
        self.context_path = Some(path.to_string());
        self
    }

    /// Set the user's preferred locale.
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.preferred_locale = Some(locale.to_string());
        self
    }

    /// Add an arbitrary top-level key to the host object.
    pub fn with_extra_key(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    /// The host navigation object as JSON.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        for (name, item_ids) in &self.regions {
            let items: Vec<Value> = item_ids.iter().map(|id| json!({ "id": id })).collect();
            object.insert(name.clone(), json!({ "items": items }));
        }
        if !self.paths.is_empty() {
            object.insert("paths".to_string(), Value::Object(self.paths.clone()));
        }
        if let Some(path) = &self.context_path {
            object.insert("contextPath".to_string(), json!(path));
        }
        if let Some(locale) = &self.preferred_locale {
            object.insert("user".to_string(), json!({ "preferredLocale": locale }));
        }
        for (key, value) in &self.extra {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }

    /// Parse the host object into a typed tree.
    pub fn build(&self) -> NavigationTree {
        match NavigationTree::from_value(&self.to_value()) {
            Ok(tree) => tree,
            Err(e) => panic!("invalid test navigation fixture: {e}"),
        }
    }
}

/// Notification bus that records every dispatched event.
#[derive(Default)]
pub struct CollectingBus {
    events: Mutex<Vec<NotificationEvent>>,
}

impl CollectingBus {
    /// Create an empty collecting bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events dispatched so far.
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().clone()
    }

    /// Number of events dispatched so far.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no events have been dispatched.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl NotificationBus for CollectingBus {
    fn dispatch(&self, event: &NotificationEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Fully wired test fixture: a context over a mutable navigation
/// provider, an in-memory store, and a collecting bus.
pub struct TestContext {
    pub context: AppContext,
    pub nav: Arc<StaticNavigation>,
    pub store: Arc<MemoryStore>,
    pub bus: Arc<CollectingBus>,
}

/// Build a context around the given navigation fixture, with the
/// current path already set.
pub fn test_context(nav_builder: &NavBuilder, current_path: &str) -> TestContext {
    let nav = Arc::new(StaticNavigation::new());
    nav.set_tree(nav_builder.build());
    nav.set_current_path(current_path);

    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(CollectingBus::new());

    let context = AppContext::builder(nav.clone())
        .with_store(store.clone())
        .with_bus(bus.clone())
        .build();

    TestContext {
        context,
        nav,
        store,
        bus,
    }
}

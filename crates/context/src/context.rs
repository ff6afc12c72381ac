//! The AppContext facade.
//!
//! One cheaply-clonable handle wiring identity resolution, scoped
//! storage, and the notification emitter over injected host
//! dependencies.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ContextConfig;
use crate::nav::NavigationProvider;
use crate::notify::{InProcessBus, NotificationBus, NotificationEmitter, NotificationMessage};
use crate::resolver::AppResolver;
use crate::store::{KeyValueStore, MemoryStore, ScopedStore};

/// Shared context handle for a micro-app.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppContext {
    inner: Arc<AppContextInner>,
}

struct AppContextInner {
    resolver: Arc<AppResolver>,
    store: ScopedStore,
    emitter: NotificationEmitter,
}

impl AppContext {
    /// Start building a context around a navigation provider.
    ///
    /// The session store and notification bus default to the bundled
    /// in-process implementations when not supplied.
    pub fn builder(nav: Arc<dyn NavigationProvider>) -> AppContextBuilder {
        AppContextBuilder {
            nav,
            config: ContextConfig::default(),
            store: None,
            bus: None,
        }
    }

    // --- Identity ---

    /// The id of the micro-app owning the current URL path, or `None`.
    pub fn current_app_id(&self) -> Option<String> {
        self.inner.resolver.current_app_id()
    }

    /// The URL path for an app (current app when `None`), falling back
    /// to the context-path sentinel for unknown ids.
    pub fn path_for(&self, app_id: Option<&str>) -> String {
        self.inner.resolver.path_for(app_id)
    }

    /// Whether the app for `app_id` is reachable by the current user.
    pub fn is_app_available(&self, app_id: &str) -> bool {
        self.inner.resolver.is_app_available(app_id)
    }

    /// The current multi-tenant context path, empty when absent.
    pub fn context_path(&self) -> String {
        self.inner.resolver.context_path()
    }

    /// The user's preferred locale key, empty when absent.
    pub fn preferred_locale(&self) -> String {
        self.inner.resolver.preferred_locale()
    }

    // --- Scoped storage ---

    /// Store a JSON-serializable value under an app-scoped key.
    pub fn set_value<T>(&self, key: &str, value: &T, app_id: Option<&str>)
    where
        T: Serialize + ?Sized,
    {
        self.inner.store.set_value(key, value, app_id);
    }

    /// Read an app-scoped value; `{}` when never written.
    pub fn get_value(&self, key: &str, app_id: Option<&str>) -> Value {
        self.inner.store.get_value(key, app_id)
    }

    /// Whether an app-scoped key holds a value.
    pub fn has_value(&self, key: &str, app_id: Option<&str>) -> bool {
        self.inner.store.has_value(key, app_id)
    }

    /// Delete an app-scoped key. Idempotent.
    pub fn remove_value(&self, key: &str, app_id: Option<&str>) {
        self.inner.store.remove_value(key, app_id);
    }

    /// Shallow-merge an object into the cross-app shared state.
    pub fn set_shared_state(&self, partial: &Map<String, Value>) {
        self.inner.store.set_shared_state(partial);
    }

    /// Lenient shared-state merge for dynamic JSON; non-objects are
    /// reported and ignored.
    pub fn merge_shared_value(&self, value: &Value) {
        self.inner.store.merge_shared_value(value);
    }

    /// Read the cross-app shared state, `{}` when never written.
    pub fn get_shared_state(&self) -> Value {
        self.inner.store.get_shared_state()
    }

    // --- Notifications ---

    /// Broadcast a notification. Fire-and-forget.
    pub fn notify(&self, message: NotificationMessage) {
        self.inner.emitter.notify(message);
    }

    /// Broadcast a simple non-persistent alert; unrecognized kinds get
    /// the info styling.
    pub fn alert(&self, kind: &str, text: &str) {
        self.inner.emitter.alert(kind, text);
    }

    /// Instruct listeners to clear all pending and displayed
    /// notifications.
    pub fn clear_all_notifications(&self) {
        self.inner.emitter.clear_all();
    }
}

/// Builder for [`AppContext`].
pub struct AppContextBuilder {
    nav: Arc<dyn NavigationProvider>,
    config: ContextConfig,
    store: Option<Arc<dyn KeyValueStore>>,
    bus: Option<Arc<dyn NotificationBus>>,
}

impl AppContextBuilder {
    /// Replace the default configuration.
    pub fn with_config(mut self, config: ContextConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject the host's session store.
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Inject the host's notification bus.
    pub fn with_bus(mut self, bus: Arc<dyn NotificationBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Assemble the context.
    pub fn build(self) -> AppContext {
        let backend = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let bus = self.bus.unwrap_or_else(|| Arc::new(InProcessBus::new()));

        let resolver = Arc::new(AppResolver::new(
            self.nav,
            self.config.regions().to_vec(),
        ));
        let store = ScopedStore::new(backend, resolver.clone(), &self.config);
        let emitter = NotificationEmitter::new(bus);

        AppContext {
            inner: Arc::new(AppContextInner {
                resolver,
                store,
                emitter,
            }),
        }
    }
}

//! Scoped session state storage.
//!
//! Values are namespaced by app id (`"{app_id}:{key}"`) and serialized
//! as JSON into the injected [`KeyValueStore`]. A reserved global
//! namespace holds cross-app shared state with shallow-merge
//! semantics: top-level properties overwrite, nothing deeper is
//! merged.
//!
//! The shared-state read-modify-write is not atomic; when two callers
//! race, the last write wins. Callers needing stronger consistency
//! must serialize their writes at the storage boundary.

mod backend;

pub use backend::{KeyValueStore, MemoryStore};

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::config::ContextConfig;
use crate::resolver::AppResolver;

/// Namespace used when no app id is given and resolution fails.
///
/// Matches the key format the original host pages already persisted,
/// so sessions written before and after a host upgrade stay readable.
const UNRESOLVED_APP_ID: &str = "null";

/// App-scoped JSON storage over a session key/value backend.
pub struct ScopedStore {
    backend: Arc<dyn KeyValueStore>,
    resolver: Arc<AppResolver>,
    global_key: String,
    state_key: String,
}

impl ScopedStore {
    /// Create a store over a backend, using `resolver` to default the
    /// namespace when callers omit the app id.
    pub fn new(
        backend: Arc<dyn KeyValueStore>,
        resolver: Arc<AppResolver>,
        config: &ContextConfig,
    ) -> Self {
        Self {
            backend,
            resolver,
            global_key: config.global_key().to_string(),
            state_key: config.state_key().to_string(),
        }
    }

    fn scoped_key(&self, key: &str, app_id: Option<&str>) -> String {
        let app = match app_id {
            Some(id) => id.to_string(),
            None => self
                .resolver
                .current_app_id()
                .unwrap_or_else(|| UNRESOLVED_APP_ID.to_string()),
        };
        format!("{app}:{key}")
    }

    /// Store a JSON-serializable value under an app-scoped key.
    ///
    /// `app_id` defaults to the current micro-app. A value that cannot
    /// be serialized is a usage error: it is reported on the diagnostic
    /// channel and the call is a no-op.
    pub fn set_value<T>(&self, key: &str, value: &T, app_id: Option<&str>)
    where
        T: Serialize + ?Sized,
    {
        let scoped = self.scoped_key(key, app_id);
        match serde_json::to_string(value) {
            Ok(json) => self.backend.set(&scoped, json),
            Err(e) => {
                error!(key = %scoped, error = %e, "refusing to store unserializable value");
            }
        }
    }

    /// Read an app-scoped value.
    ///
    /// A never-written key yields an empty JSON object. A stored value
    /// that no longer parses also yields an empty object, with a
    /// warning; the caller never sees an error.
    pub fn get_value(&self, key: &str, app_id: Option<&str>) -> Value {
        let scoped = self.scoped_key(key, app_id);
        let Some(raw) = self.backend.get(&scoped) else {
            return Value::Object(Map::new());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %scoped, error = %e, "stored value is not valid JSON, returning empty object");
                Value::Object(Map::new())
            }
        }
    }

    /// Whether an app-scoped key holds a value. Presence only; the
    /// stored value's content is not inspected.
    pub fn has_value(&self, key: &str, app_id: Option<&str>) -> bool {
        self.backend.contains(&self.scoped_key(key, app_id))
    }

    /// Delete an app-scoped key. Idempotent.
    pub fn remove_value(&self, key: &str, app_id: Option<&str>) {
        self.backend.remove(&self.scoped_key(key, app_id));
    }

    /// Shallow-merge `partial` into the cross-app shared state.
    ///
    /// The parameter type rejects non-objects at the call boundary.
    /// Top-level properties of `partial` overwrite the stored state;
    /// nested objects are replaced wholesale, not merged.
    pub fn set_shared_state(&self, partial: &Map<String, Value>) {
        let mut state = match self.get_value(&self.state_key, Some(self.global_key.as_str())) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        for (key, value) in partial {
            state.insert(key.clone(), value.clone());
        }

        self.set_value(
            &self.state_key,
            &Value::Object(state),
            Some(self.global_key.as_str()),
        );
    }

    /// Lenient shared-state merge for callers holding dynamic JSON.
    ///
    /// Non-object input is a usage error: reported on the diagnostic
    /// channel, call is a no-op. Object input behaves exactly like
    /// [`set_shared_state`](Self::set_shared_state).
    pub fn merge_shared_value(&self, value: &Value) {
        match value.as_object() {
            Some(map) => self.set_shared_state(map),
            None => error!("shared state merge requires a JSON object"),
        }
    }

    /// Read the cross-app shared state, `{}` when never written.
    pub fn get_shared_state(&self) -> Value {
        self.get_value(&self.state_key, Some(self.global_key.as_str()))
    }
}

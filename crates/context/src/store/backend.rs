//! Session key/value storage interface.

use dashmap::DashMap;

/// String key/value store with browser-session semantics.
///
/// The host environment supplies the real session-scoped store; the
/// library serializes JSON to and from this layer. All state access
/// goes through this trait so hosts and tests can inject their own
/// backend.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw string stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String);

    /// Delete `key`. Absent keys are not an error.
    fn remove(&self, key: &str);

    /// Whether `key` currently holds a value.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory store with session semantics.
///
/// Entries live until removed or the store is dropped with the
/// session. Also serves as the test double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(!store.contains("a"));

        store.set("a", "1".to_string());
        assert_eq!(store.get("a").as_deref(), Some("1"));
        assert!(store.contains("a"));
        assert_eq!(store.len(), 1);

        store.set("a", "2".to_string());
        assert_eq!(store.get("a").as_deref(), Some("2"));

        store.remove("a");
        assert!(store.get("a").is_none());

        // Removing again is a no-op.
        store.remove("a");
    }
}

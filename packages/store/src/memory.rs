use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::kv::KeyValueStore;

/// In-memory KeyValueStore for tests and non-browser targets.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let store = MemoryStore::new();

        // Initially empty
        assert!(store.is_empty());
        assert!(store.get("access-token").is_none());

        store.set("access-token", "abc");
        assert_eq!(store.get("access-token").as_deref(), Some("abc"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_last_value() {
        let store = MemoryStore::new();

        store.set("identity", "first");
        store.set("identity", "second");

        assert_eq!(store.get("identity").as_deref(), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new();

        store.set("a", "1");
        store.set("b", "2");
        store.remove("a");

        assert!(store.get("a").is_none());
        assert_eq!(store.get("b").as_deref(), Some("2"));

        // Removing a missing key is a no-op
        store.remove("missing");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("access-token", "shared");
        assert_eq!(other.get("access-token").as_deref(), Some("shared"));
    }
}

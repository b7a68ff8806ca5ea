//! Process-wide mutable property store.
//!
//! Callers may set a property at any point before the run finishes (for
//! example from a suite-level hook) and the late value must still win. The
//! resolver therefore never copies this store; it holds a handle and reads
//! through it on every lookup.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

static GLOBAL: OnceLock<PropertyStore> = OnceLock::new();

/// Shared, thread-safe string properties.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl PropertyStore {
    /// Create an isolated store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The store shared by the whole process.
    pub fn global() -> &'static PropertyStore {
        GLOBAL.get_or_init(PropertyStore::new)
    }

    /// Set (or replace) a property.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.into(), value.into());
    }

    /// Remove a property, returning its previous value.
    pub fn remove(&self, key: &str) -> Option<String> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.remove(key)
    }

    /// Read the current value of a property.
    pub fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(key).cloned()
    }

    /// Current keys starting with `prefix`, with the prefix stripped.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.keys()
            .filter_map(|k| k.strip_prefix(prefix))
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = PropertyStore::new();
        assert_eq!(store.get("a"), None);
        store.set("a", "1");
        assert_eq!(store.get("a").as_deref(), Some("1"));
        store.set("a", "2");
        assert_eq!(store.remove("a").as_deref(), Some("2"));
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_clones_share_state() {
        let store = PropertyStore::new();
        let handle = store.clone();
        handle.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_keys_with_prefix() {
        let store = PropertyStore::new();
        store.set("cucumber.summary.env.url", "x");
        store.set("cucumber.summary.", "ignored");
        store.set("other.key", "y");
        assert_eq!(store.keys_with_prefix("cucumber.summary."), vec!["env.url"]);
    }
}

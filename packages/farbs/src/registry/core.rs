//! Keyed registry with last-write-wins semantics.

use std::collections::HashMap;
use std::fmt;

/// Registry mapping string ids to values.
///
/// Registering under an existing id replaces the previous value. Any string,
/// the empty one included, is a valid id.
pub struct Registry<T> {
    entries: HashMap<String, T>,
}

impl<T> Registry<T> {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a value, replacing whatever was stored under `id`.
    pub fn register(&mut self, id: impl Into<String>, value: T) {
        self.entries.insert(id.into(), value);
    }

    /// Borrow the value registered under `id`.
    #[must_use]
    pub fn get_ref(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    /// Check if anything is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Return all registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Clone> Registry<T> {
    /// Get a copy of the value registered under `id`.
    ///
    /// Registries hold `Rc` handles, so the copy is another handle to the
    /// same value.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<T> {
        self.entries.get(id).cloned()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("ids", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = Registry::new();
        registry.register("__ITEM_ID", "__ITEM__");

        assert_eq!(registry.get("__ITEM_ID"), Some("__ITEM__"));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_registry_overwrites() {
        let mut registry = Registry::new();
        registry.register("__ITEM_ID", "__ITEM__");
        registry.register("__ITEM_ID", "__ITEM2__");

        assert_eq!(registry.get("__ITEM_ID"), Some("__ITEM2__"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_empty_id_is_a_key() {
        let mut registry = Registry::new();
        registry.register("", 0);

        assert!(registry.contains(""));
        assert_eq!(registry.get_ref(""), Some(&0));
    }

    #[test]
    fn test_registry_ids_sorted_and_clear() {
        let mut registry = Registry::new();
        registry.register("b", 2);
        registry.register("a", 1);

        assert_eq!(registry.ids(), ["a", "b"]);

        registry.clear();
        assert!(registry.is_empty());
    }
}

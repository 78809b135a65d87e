// Namespace Module
//
// One name-to-resource mapping of a catalog node. Keys are case-folded and
// entries keep their insertion order.

use std::fmt;
use std::sync::Arc;
use linked_hash_map::LinkedHashMap;

/// Fold a name into the form used as a namespace key
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Mapping from case-insensitive names to shared, immutable resources
pub struct Namespace<R> {
    entries: LinkedHashMap<String, Arc<R>>,
}

impl<R> Namespace<R> {
    pub fn new() -> Self {
        Namespace {
            entries: LinkedHashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Arc<R>> {
        self.entries.get(&normalize_name(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_name(key))
    }

    /// Insert under `key`, returning the entry it displaced
    pub fn insert(&mut self, key: &str, resource: Arc<R>) -> Option<Arc<R>> {
        self.entries.insert(normalize_name(key), resource)
    }

    pub fn remove(&mut self, key: &str) -> Option<Arc<R>> {
        self.entries.remove(&normalize_name(key))
    }

    /// Stored (case-folded) keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<R>> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R> Default for Namespace<R> {
    fn default() -> Self {
        Self::new()
    }
}

// New map, same leaves
impl<R> Clone for Namespace<R> {
    fn clone(&self) -> Self {
        Namespace {
            entries: self.entries.clone(),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Namespace<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

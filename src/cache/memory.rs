//! Pluggable memory-cache tier.
//!
//! [`MemoryCache`] is the capability a [`FileBasedCache`](super::FileBasedCache)
//! consults before touching disk. Plug in whatever your application already
//! has (a session store, an app-wide map); [`NoopCache`] turns the memory
//! tier off and [`InMemoryCache`] is a process-wide map.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Value stored in a memory cache. Each cache key holds one type.
pub type CachedValue = Arc<dyn Any + Send + Sync>;

/// Keyed store backing the memory tier.
///
/// Implementations are shared behind an `Arc` across any number of
/// caches, so all methods take `&self`.
pub trait MemoryCache: Send + Sync {
    /// Whether a value is stored under `key`.
    fn contains(&self, key: &str) -> bool;

    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> Option<CachedValue>;

    /// Store a value under `key`, replacing any previous one.
    fn put(&self, key: &str, value: CachedValue);

    /// Remove the value under `key`, if any.
    fn remove(&self, key: &str);
}

/// Typed access on top of any [`MemoryCache`].
pub trait MemoryCacheExt: MemoryCache {
    /// Get a clone of the value under `key`.
    ///
    /// Returns `None` when the key is absent or holds a different type.
    fn get_typed<V>(&self, key: &str) -> Option<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        self.get(key)?.downcast_ref::<V>().cloned()
    }

    /// Store `value` under `key`.
    fn put_typed<V>(&self, key: &str, value: V)
    where
        V: Send + Sync + 'static,
    {
        self.put(key, Arc::new(value));
    }
}

impl<C: MemoryCache + ?Sized> MemoryCacheExt for C {}

/// Memory cache that stores nothing.
///
/// Pass this when a cache should be file-only.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl MemoryCache for NoopCache {
    fn contains(&self, _key: &str) -> bool {
        false
    }

    fn get(&self, _key: &str) -> Option<CachedValue> {
        None
    }

    fn put(&self, _key: &str, _value: CachedValue) {}

    fn remove(&self, _key: &str) {}
}

/// Process-wide memory cache backed by a map.
#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CachedValue>>,
}

impl InMemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored value.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl std::fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("len", &self.len())
            .finish()
    }
}

impl MemoryCache for InMemoryCache {
    fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn get(&self, key: &str) -> Option<CachedValue> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: CachedValue) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_never_stores() {
        let cache = NoopCache;
        cache.put_typed("widgets", vec![1, 2, 3]);

        assert!(!cache.contains("widgets"));
        assert!(cache.get("widgets").is_none());
        cache.remove("widgets");
    }

    #[test]
    fn in_memory_put_and_get() {
        let cache = InMemoryCache::new();
        cache.put_typed("widgets", vec!["a".to_string()]);

        assert!(cache.contains("widgets"));
        assert_eq!(
            cache.get_typed::<Vec<String>>("widgets"),
            Some(vec!["a".to_string()])
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn typed_get_with_wrong_type_is_none() {
        let cache = InMemoryCache::new();
        cache.put_typed("widgets", vec![1u32]);

        assert!(cache.contains("widgets"));
        assert!(cache.get_typed::<Vec<String>>("widgets").is_none());
    }

    #[test]
    fn remove_and_clear() {
        let cache = InMemoryCache::new();
        cache.put_typed("a", 1u8);
        cache.put_typed("b", 2u8);

        cache.remove("a");
        cache.remove("missing");
        assert!(!cache.contains("a"));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn shared_behind_arc_dyn() {
        let cache: Arc<dyn MemoryCache> = Arc::new(InMemoryCache::new());
        let other = Arc::clone(&cache);

        cache.put_typed("k", 7i64);
        assert_eq!(other.get_typed::<i64>("k"), Some(7));
    }
}

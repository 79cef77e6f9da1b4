//! Mutex-guarded façade for sharing an [`LruCache`] between threads.

use std::sync::{Mutex, MutexGuard, PoisonError};

use hoard_core::ByteSize;
use smol_str::SmolStr;

use crate::cache::LruCache;

/// Thread-safe wrapper around [`LruCache`].
///
/// A single exclusive lock covers reads and writes alike, since a hit
/// reorders the recency list. Critical sections are short and CPU-only.
/// Values are cloned out of the cache on [`get`](Self::get), so store
/// cheaply cloneable values (`Bytes`, `ByteView`, `Arc<T>`).
///
/// The eviction callback runs while the lock is held and must not call
/// back into the same `SyncLruCache`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use hoard_lru::{LruCache, SyncLruCache};
///
/// let cache = Arc::new(SyncLruCache::new(LruCache::new(1024)));
///
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let cache = Arc::clone(&cache);
///         thread::spawn(move || cache.add(format!("key-{i}"), vec![0u8; 8]))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(cache.len(), 4);
/// ```
pub struct SyncLruCache<V> {
    inner: Mutex<LruCache<V>>,
}

impl<V: ByteSize> SyncLruCache<V> {
    /// Wraps an existing cache.
    pub fn new(cache: LruCache<V>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// Inserts or replaces the value for `key`. See [`LruCache::add`].
    pub fn add(&self, key: impl Into<SmolStr>, value: V) {
        self.lock().add(key, value);
    }

    /// Removes the least recently used entry. See [`LruCache::remove_oldest`].
    pub fn remove_oldest(&self) {
        self.lock().remove_oldest();
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the bytes currently accounted for live entries.
    pub fn used_bytes(&self) -> usize {
        self.lock().used_bytes()
    }

    /// Runs `f` with exclusive access to the underlying cache.
    ///
    /// Useful for compound operations that must not interleave with other
    /// callers. `f` must not call back into this `SyncLruCache`.
    pub fn with<R>(&self, f: impl FnOnce(&mut LruCache<V>) -> R) -> R {
        f(&mut self.lock())
    }

    /// Consumes the wrapper and returns the underlying cache.
    pub fn into_inner(self) -> LruCache<V> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // Every mutation finishes unlinking and evicting before the eviction
    // callback (the only code that can panic under the lock) runs, so a
    // poisoned lock still guards a cache within its byte budget.
    fn lock(&self) -> MutexGuard<'_, LruCache<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: ByteSize + Clone> SyncLruCache<V> {
    /// Looks up `key`, marks it most recently used and returns a clone.
    pub fn get(&self, key: &str) -> Option<V> {
        self.lock().get(key).cloned()
    }
}

impl<V: ByteSize> From<LruCache<V>> for SyncLruCache<V> {
    fn from(cache: LruCache<V>) -> Self {
        Self::new(cache)
    }
}

impl<V> std::fmt::Debug for SyncLruCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_lock() {
            Ok(cache) => f.debug_tuple("SyncLruCache").field(&*cache).finish(),
            Err(_) => f.debug_tuple("SyncLruCache").field(&"<locked>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_get_returns_clone_and_promotes() {
        let cache = SyncLruCache::new(LruCache::new(8));
        cache.add("a", String::from("11"));
        cache.add("b", String::from("22"));

        assert_eq!(cache.get("a").as_deref(), Some("11"));
        cache.add("c", String::from("33"));

        assert!(cache.get("b").is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_panicking_callback_leaves_cache_within_budget() {
        let cache = Arc::new(SyncLruCache::new(
            LruCache::builder()
                .max_bytes(10)
                .on_evicted(|key: &str, _value: String| {
                    if key == "a" {
                        panic!("eviction callback failed on {key}");
                    }
                })
                .build(),
        ));
        cache.add("a", String::from("1234"));
        cache.add("b", String::from("1234"));

        let writer = Arc::clone(&cache);
        let result = thread::spawn(move || writer.add("c", String::from("12345678"))).join();
        assert!(result.is_err());

        assert_eq!(cache.used_bytes(), 9);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("c").as_deref(), Some("12345678"));
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_with_exposes_inner_cache() {
        let cache = SyncLruCache::new(LruCache::unbounded());
        cache.add("x", vec![1u8, 2, 3]);
        let order: Vec<String> = cache.with(|c| c.keys().map(str::to_owned).collect());
        assert_eq!(order, vec!["x"]);
        assert_eq!(cache.into_inner().used_bytes(), 4);
    }

    #[test]
    fn test_concurrent_writers_respect_budget() {
        let cache = Arc::new(SyncLruCache::new(LruCache::new(256)));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..200 {
                        cache.add(format!("t{t}-{i}"), vec![0u8; 10]);
                        let _ = cache.get(&format!("t{t}-{}", i / 2));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.used_bytes() <= 256);
        cache.with(|c| {
            let recount: usize = c
                .keys()
                .map(|k| k.len() + c.peek(k).map(Vec::len).unwrap_or(0))
                .sum();
            assert_eq!(recount, c.used_bytes());
        });
    }
}

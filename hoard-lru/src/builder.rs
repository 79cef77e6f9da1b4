//! Builder for configuring [`LruCache`].

use hoard_core::ByteSize;
use smol_str::SmolStr;

use crate::cache::{EvictionCallback, LruCache};

/// Builder for creating and configuring an [`LruCache`].
///
/// Use [`LruCache::builder`] to create a new builder instance. Every setting
/// is fixed once the cache is built.
///
/// # Example
///
/// ```
/// use hoard_lru::LruCache;
///
/// let mut cache = LruCache::builder()
///     .label("scores")
///     .max_bytes(10)
///     .on_evicted(|key: &str, value: String| {
///         println!("evicted {key}={value}");
///     })
///     .build();
///
/// cache.add("key1", String::from("123456"));
/// cache.add("k2", String::from("k2"));
/// assert_eq!(cache.len(), 1);
/// ```
pub struct LruCacheBuilder<V> {
    max_bytes: i64,
    on_evicted: Option<EvictionCallback<V>>,
    label: SmolStr,
}

impl<V: ByteSize> LruCacheBuilder<V> {
    /// Creates a builder for an unbounded cache with no eviction callback.
    pub fn new() -> Self {
        Self {
            max_bytes: 0,
            on_evicted: None,
            label: SmolStr::new_static("lru"),
        }
    }

    /// Sets the byte budget.
    ///
    /// Entries are accounted as `key.len() + value.byte_size()`. A value of
    /// zero or less disables eviction.
    ///
    /// # Default
    ///
    /// `0` (unlimited)
    pub fn max_bytes(mut self, max_bytes: i64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Sets a callback invoked with each evicted entry.
    ///
    /// The callback runs synchronously inside the cache operation that caused
    /// the eviction. It must not block and must not touch the same cache.
    pub fn on_evicted<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, V) + Send + 'static,
    {
        self.on_evicted = Some(Box::new(callback));
        self
    }

    /// Sets the label identifying this cache in logs and metrics.
    ///
    /// # Default
    ///
    /// `"lru"`
    pub fn label(mut self, label: impl Into<SmolStr>) -> Self {
        self.label = label.into();
        self
    }

    /// Builds the [`LruCache`].
    pub fn build(self) -> LruCache<V> {
        LruCache::from_parts(self.max_bytes, self.on_evicted, self.label)
    }
}

impl<V: ByteSize> Default for LruCacheBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for LruCacheBuilder<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruCacheBuilder")
            .field("max_bytes", &self.max_bytes)
            .field("on_evicted", &self.on_evicted.is_some())
            .field("label", &self.label)
            .finish()
    }
}

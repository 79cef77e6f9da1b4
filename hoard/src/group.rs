use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use hoard_core::ByteView;
use hoard_lru::{LruCache, SyncLruCache};
use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::loader::Loader;
use crate::metrics;

/// A named cache namespace.
///
/// Different kinds of data (user names, profiles, scores) live in
/// different groups, each with its own byte budget and loader.
///
/// ```text
/// get(key) ──► cached? ──yes──► return view
///                 │
///                 no
///                 ▼
///         loader.load(key) ──err──► CacheError::Load (not cached)
///                 │
///                 ok
///                 ▼
///        add to cache ──► return view
/// ```
///
/// Concurrent misses on the same key are not coalesced: each of them calls
/// the loader. The cache lock is never held while the loader runs.
pub struct Group {
    name: SmolStr,
    cache: SyncLruCache<ByteView>,
    loader: Arc<dyn Loader>,
}

impl Group {
    /// Creates a group whose cache holds at most `max_bytes` bytes.
    ///
    /// A non-positive `max_bytes` disables eviction.
    pub fn new(name: impl Into<SmolStr>, max_bytes: i64, loader: impl Loader + 'static) -> Self {
        Self::with_shared_loader(name, max_bytes, Arc::new(loader))
    }

    /// Creates a group from a loader that is already shared.
    pub fn with_shared_loader(
        name: impl Into<SmolStr>,
        max_bytes: i64,
        loader: Arc<dyn Loader>,
    ) -> Self {
        let name = name.into();
        let cache = LruCache::builder()
            .label(name.clone())
            .max_bytes(max_bytes)
            .build();
        Self {
            name,
            cache: SyncLruCache::new(cache),
            loader,
        }
    }

    /// Returns the group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value for `key`, loading and caching it on a miss.
    pub async fn get(&self, key: &str) -> Result<ByteView, CacheError> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        if let Some(view) = self.cache.get(key) {
            debug!(group = %self.name, key, "cache hit");
            metrics::record_hit(&self.name);
            return Ok(view);
        }

        debug!(group = %self.name, key, "cache miss, loading");
        metrics::record_miss(&self.name);
        self.load(key).await
    }

    /// Returns the number of cached entries.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Returns the bytes accounted for cached entries.
    pub fn cache_bytes(&self) -> usize {
        self.cache.used_bytes()
    }

    // Misses are always served locally; the ring is not consulted here.
    async fn load(&self, key: &str) -> Result<ByteView, CacheError> {
        self.load_locally(key).await
    }

    async fn load_locally(&self, key: &str) -> Result<ByteView, CacheError> {
        let started = Instant::now();
        let loaded = self.loader.load(key).await;
        metrics::record_load(&self.name, started.elapsed(), loaded.is_ok());

        let bytes = loaded.map_err(|source| {
            warn!(group = %self.name, key, error = %source, "loader failed");
            CacheError::Load {
                key: key.to_owned(),
                source,
            }
        })?;

        // detach from the loader's buffer so accounting matches what is retained
        let view = ByteView::copy_from_slice(&bytes);
        self.populate_cache(key, view.clone());
        Ok(view)
    }

    fn populate_cache(&self, key: &str, view: ByteView) {
        self.cache.add(key, view);
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

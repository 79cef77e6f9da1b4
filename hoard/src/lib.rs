#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Error types for cache operations.
///
/// Defines [`CacheError`] which covers:
/// - Rejected requests (empty keys, unknown groups)
/// - Loader failures, propagated unchanged and never cached
pub mod error;

/// Named cache namespaces.
///
/// A [`Group`] couples a byte-bounded LRU cache with a [`Loader`] that
/// fills it on misses.
pub mod group;

/// The data-loading contract used on cache misses.
pub mod loader;

/// Metrics collection for cache observability.
///
/// When the `metrics` feature is enabled, this module records hit, miss and
/// load counters plus load latency, labelled by group.
pub mod metrics;

/// Explicit registry of groups by name.
pub mod registry;

pub use error::CacheError;
pub use group::Group;
pub use hoard_core::{ByteSize, ByteView, HashFn, NodeName, Raw, crc32_ieee};
pub use hoard_lru::{LruCache, LruCacheBuilder, SyncLruCache};
pub use hoard_ring::{DEFAULT_REPLICAS, HashRing, HashRingBuilder, RingError, SharedRing};
pub use loader::{BoxError, Loader};
pub use registry::Registry;

/// The `hoard` prelude.
///
/// ```rust
/// use hoard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{ByteView, CacheError, Group, Loader, Registry};
}

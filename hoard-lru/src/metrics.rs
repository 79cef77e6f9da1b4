//! LRU cache capacity metrics.
//!
//! Enable the `metrics` feature to record these.
//!
//! ## Metrics
//!
//! - `hoard_lru_entries` - Current number of entries in the cache (gauge)
//! - `hoard_lru_used_bytes` - Current accounted size in bytes (gauge)
//! - `hoard_lru_evictions_total` - Entries evicted so far (counter)
//!
//! All metrics carry a `cache` label holding the cache's configured label.

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Metric name for cache entry count gauge.
    pub static ref LRU_ENTRIES: &'static str = {
        metrics::describe_gauge!(
            "hoard_lru_entries",
            "Current number of entries in the LRU cache."
        );
        "hoard_lru_entries"
    };

    /// Metric name for accounted cache size gauge.
    pub static ref LRU_USED_BYTES: &'static str = {
        metrics::describe_gauge!(
            "hoard_lru_used_bytes",
            metrics::Unit::Bytes,
            "Bytes currently accounted for LRU cache entries."
        );
        "hoard_lru_used_bytes"
    };

    /// Metric name for eviction counter.
    pub static ref LRU_EVICTIONS: &'static str = {
        metrics::describe_counter!(
            "hoard_lru_evictions_total",
            "Total number of entries evicted from the LRU cache."
        );
        "hoard_lru_evictions_total"
    };
}

/// Record current cache capacity metrics.
///
/// # Arguments
///
/// * `cache` - Cache label for metric identification
/// * `entries` - Current number of entries in the cache
/// * `used_bytes` - Current accounted size in bytes
#[cfg(feature = "metrics")]
#[inline]
pub fn record_capacity(cache: &str, entries: u64, used_bytes: u64) {
    metrics::gauge!(*LRU_ENTRIES, "cache" => cache.to_string()).set(entries as f64);
    metrics::gauge!(*LRU_USED_BYTES, "cache" => cache.to_string()).set(used_bytes as f64);
}

/// Record current cache capacity metrics (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_capacity(_cache: &str, _entries: u64, _used_bytes: u64) {}

/// Record a single eviction.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_eviction(cache: &str) {
    metrics::counter!(*LRU_EVICTIONS, "cache" => cache.to_string()).increment(1);
}

/// Record a single eviction (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_eviction(_cache: &str) {}

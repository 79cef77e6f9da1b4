//! Metrics declaration and initialization.

use std::time::Duration;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Track number of cache hit events.
    pub static ref CACHE_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "hoard_cache_hit_total",
            "Total number of cache hit events."
        );
        "hoard_cache_hit_total"
    };
    /// Track number of cache miss events.
    pub static ref CACHE_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "hoard_cache_miss_total",
            "Total number of cache miss events."
        );
        "hoard_cache_miss_total"
    };
    /// Track number of failed loads.
    pub static ref LOAD_ERROR_COUNTER: &'static str = {
        metrics::describe_counter!(
            "hoard_load_errors_total",
            "Total number of loader failures."
        );
        "hoard_load_errors_total"
    };
    /// Histogram of loader call duration.
    pub static ref LOAD_DURATION: &'static str = {
        metrics::describe_histogram!(
            "hoard_load_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of loader calls in seconds."
        );
        "hoard_load_duration_seconds"
    };
}

/// Record a cache hit for `group`.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_hit(group: &str) {
    metrics::counter!(*CACHE_HIT_COUNTER, "group" => group.to_string()).increment(1);
}

/// Record a cache miss for `group`.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_miss(group: &str) {
    metrics::counter!(*CACHE_MISS_COUNTER, "group" => group.to_string()).increment(1);
}

/// Record a finished loader call for `group`.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_load(group: &str, duration: Duration, success: bool) {
    metrics::histogram!(*LOAD_DURATION, "group" => group.to_string())
        .record(duration.as_secs_f64());
    if !success {
        metrics::counter!(*LOAD_ERROR_COUNTER, "group" => group.to_string()).increment(1);
    }
}

/// No-op version when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_hit(_group: &str) {}

/// No-op version when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_miss(_group: &str) {}

/// No-op version when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_load(_group: &str, _duration: Duration, _success: bool) {}

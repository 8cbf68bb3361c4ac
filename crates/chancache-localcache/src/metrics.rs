//! Prometheus metrics for the channel cache layer.

use metrics::{counter, describe_counter};
use std::fmt;

/// Metric names for the cache layer.
pub mod names {
    /// Reads answered from a cache.
    pub const CACHE_HITS_TOTAL: &str = "chancache_cache_hits_total";
    /// Cache-first reads that fell through to the store.
    pub const CACHE_MISSES_TOTAL: &str = "chancache_cache_misses_total";
    /// Entries removed or caches purged.
    pub const CACHE_INVALIDATIONS_TOTAL: &str = "chancache_cache_invalidations_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_HITS_TOTAL,
        "Total number of reads served from the local cache"
    );
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Total number of cache-first reads that reached the store"
    );
    describe_counter!(
        names::CACHE_INVALIDATIONS_TOTAL,
        "Total number of cache invalidations"
    );
}

/// How a cache was invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationKind {
    /// One key removed.
    Remove,
    /// Whole cache purged.
    Purge,
}

impl InvalidationKind {
    /// Label value for metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Remove => "remove",
            Self::Purge => "purge",
        }
    }
}

impl fmt::Display for InvalidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache metrics recorder.
#[derive(Clone)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a cache hit.
    pub fn hit(cache: &str) {
        counter!(names::CACHE_HITS_TOTAL, "cache" => cache.to_string()).increment(1);
    }

    /// Record a cache miss.
    pub fn miss(cache: &str) {
        counter!(names::CACHE_MISSES_TOTAL, "cache" => cache.to_string()).increment(1);
    }

    /// Record an invalidation.
    pub fn invalidation(cache: &str, kind: InvalidationKind) {
        counter!(
            names::CACHE_INVALIDATIONS_TOTAL,
            "cache" => cache.to_string(),
            "kind" => kind.as_str()
        )
        .increment(1);
    }
}

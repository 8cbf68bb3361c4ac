//! Cache interface traits for named in-process caches.

use chancache_core::{ChancacheResult, Interface};
use std::sync::Arc;
use std::time::Duration;

/// A single named key-value cache.
///
/// Values are stored as JSON strings so the trait stays dyn-compatible.
/// Implementations own their concurrency safety and eviction policy.
pub trait Cache: Send + Sync {
    /// Name the cache was created with.
    fn name(&self) -> &str;

    /// Get a raw JSON value.
    ///
    /// Returns `None` if the key is absent or has expired.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Insert or overwrite a raw JSON value.
    fn put_raw(&self, key: &str, value: String) -> ChancacheResult<()>;

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str);

    /// Remove every entry.
    fn purge(&self);

    /// Number of live entries.
    fn len(&self) -> u64;

    /// Checks if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extension trait with typed methods for convenience.
pub trait CacheExt: Cache {
    /// Get a typed value.
    ///
    /// A value that no longer deserializes as `T` is treated as a miss.
    fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.get_raw(key)?;
        serde_json::from_str(&json).ok()
    }

    /// Set a typed value.
    fn put<T: serde::Serialize>(&self, key: &str, value: &T) -> ChancacheResult<()> {
        let json = serde_json::to_string(value)?;
        self.put_raw(key, json)
    }
}

// Blanket implementation for all Cache implementations
impl<T: Cache + ?Sized> CacheExt for T {}

/// Options for creating one named cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    /// Cache name, also used as the metrics label.
    pub name: String,
    /// Maximum number of entries.
    pub size: u64,
    /// Entry lifetime, if any.
    pub default_expiry: Option<Duration>,
}

impl CacheOptions {
    /// Creates cache options.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, default_expiry: Option<Duration>) -> Self {
        Self {
            name: name.into(),
            size,
            default_expiry,
        }
    }
}

/// Factory for named caches.
pub trait CacheProvider: Interface + Send + Sync {
    /// Creates a new, empty cache.
    fn new_cache(&self, options: &CacheOptions) -> ChancacheResult<Arc<dyn Cache>>;

    /// Short name of the backing implementation.
    fn provider_name(&self) -> &str;
}

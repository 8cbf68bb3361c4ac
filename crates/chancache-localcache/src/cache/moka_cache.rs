//! Moka-based cache provider.

use super::{Cache, CacheOptions, CacheProvider};
use chancache_core::{ChancacheError, ChancacheResult};
use shaku::Component;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Default upper bound for a single serialized value (1 MiB).
pub const DEFAULT_MAX_VALUE_BYTES: usize = 1024 * 1024;

/// A named cache backed by `moka::sync::Cache`.
pub struct MokaCache {
    name: String,
    inner: moka::sync::Cache<String, String>,
    max_value_bytes: usize,
}

impl MokaCache {
    /// Builds a cache from options.
    #[must_use]
    pub fn new(options: &CacheOptions, max_value_bytes: usize) -> Self {
        let mut builder = moka::sync::Cache::builder()
            .name(&options.name)
            .max_capacity(options.size);
        if let Some(ttl) = options.default_expiry {
            builder = builder.time_to_live(ttl);
        }

        Self {
            name: options.name.clone(),
            inner: builder.build(),
            max_value_bytes,
        }
    }
}

impl Cache for MokaCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn put_raw(&self, key: &str, value: String) -> ChancacheResult<()> {
        if value.len() > self.max_value_bytes {
            return Err(ChancacheError::cache(format!(
                "Value for key '{}' in cache '{}' is {} bytes, exceeds maximum {}",
                key,
                self.name,
                value.len(),
                self.max_value_bytes
            )));
        }

        self.inner.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.inner.invalidate(key);
    }

    fn purge(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks();
    }

    fn len(&self) -> u64 {
        // entry_count is only accurate after pending maintenance
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl fmt::Debug for MokaCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MokaCache")
            .field("name", &self.name)
            .field("max_value_bytes", &self.max_value_bytes)
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

/// Creates [`MokaCache`] instances.
#[derive(Component, Debug, Clone)]
#[shaku(interface = CacheProvider)]
pub struct MokaCacheProvider {
    /// Largest serialized value any created cache accepts.
    #[shaku(default = DEFAULT_MAX_VALUE_BYTES)]
    max_value_bytes: usize,
}

impl Default for MokaCacheProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VALUE_BYTES)
    }
}

impl MokaCacheProvider {
    /// Creates a provider with a value size limit.
    #[must_use]
    pub const fn new(max_value_bytes: usize) -> Self {
        Self { max_value_bytes }
    }

    /// Returns the value size limit.
    #[must_use]
    pub const fn max_value_bytes(&self) -> usize {
        self.max_value_bytes
    }
}

impl CacheProvider for MokaCacheProvider {
    fn new_cache(&self, options: &CacheOptions) -> ChancacheResult<Arc<dyn Cache>> {
        if options.size == 0 {
            return Err(ChancacheError::Configuration(format!(
                "Cache '{}' must have a size greater than 0",
                options.name
            )));
        }

        debug!(
            "Creating cache '{}' (size {}, ttl {:?})",
            options.name, options.size, options.default_expiry
        );
        Ok(Arc::new(MokaCache::new(options, self.max_value_bytes)))
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

//! Dependency injection module using Shaku.
//!
//! `LocalCacheModule` holds the authoritative store (read and write
//! handles over one shared state) and the cache provider. The cache layer
//! itself wraps a resolved store, so it is assembled by
//! [`build_channel_layer`] rather than registered as a component.

use chancache_config::LocalCacheConfig;
use chancache_core::{module, ChancacheResult, HasComponent};
use chancache_localcache::{
    CacheProvider, InvalidatingChannelWriter, LocalCacheChannelStore, MokaCacheProvider,
    MokaCacheProviderParameters,
};
use chancache_repository::{
    ChannelStore, ChannelWriteStore, MemoryChannelState, MemoryChannelStore,
    MemoryChannelStoreParameters, MemoryChannelWriteStore, MemoryChannelWriteStoreParameters,
};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Shaku Module Definitions
// ============================================================================

// Single-process module with the in-memory store and the Moka provider.
module! {
    pub LocalCacheModule {
        components = [
            MemoryChannelStore,
            MemoryChannelWriteStore,
            MokaCacheProvider,
        ],
        providers = [],
    }
}

// ============================================================================
// Module Builders
// ============================================================================

/// Builds the module with fresh store state.
#[must_use]
pub fn build_module(config: &LocalCacheConfig) -> Arc<LocalCacheModule> {
    let state = MemoryChannelState::new_shared();

    let module = LocalCacheModule::builder()
        .with_component_parameters::<MemoryChannelStore>(MemoryChannelStoreParameters {
            state: Arc::clone(&state),
        })
        .with_component_parameters::<MemoryChannelWriteStore>(MemoryChannelWriteStoreParameters {
            state,
        })
        .with_component_parameters::<MokaCacheProvider>(MokaCacheProviderParameters {
            max_value_bytes: config.max_value_bytes,
        })
        .build();

    Arc::new(module)
}

/// Read and write entry points for channel data.
#[derive(Clone)]
pub struct ChannelLayer {
    /// Read side; cached when the cache is enabled.
    pub reader: Arc<dyn ChannelStore>,
    /// Write side; invalidates the cache when it is enabled.
    pub writer: Arc<dyn ChannelWriteStore>,
    /// The cache layer, if enabled.
    pub cache: Option<Arc<LocalCacheChannelStore>>,
}

/// Assembles the channel layer from a module.
///
/// With the cache disabled the raw store handles are returned unchanged.
pub fn build_channel_layer(module: &LocalCacheModule, config: &LocalCacheConfig) -> ChancacheResult<ChannelLayer> {
    let store = module.channel_store();
    let write_store = module.channel_write_store();

    if !config.enabled {
        info!("Local cache disabled; reading straight from the store");
        return Ok(ChannelLayer {
            reader: store,
            writer: write_store,
            cache: None,
        });
    }

    let provider = module.cache_provider();
    let cache = Arc::new(LocalCacheChannelStore::new(store, provider.as_ref(), config)?);
    let writer = Arc::new(InvalidatingChannelWriter::new(write_store, Arc::clone(&cache)));

    Ok(ChannelLayer {
        reader: cache.clone(),
        writer,
        cache: Some(cache),
    })
}

// ============================================================================
// Module Resolution Helpers
// ============================================================================

/// Trait for resolving store components.
pub trait StoreResolver {
    /// Resolves the authoritative read store.
    fn channel_store(&self) -> Arc<dyn ChannelStore>;

    /// Resolves the authoritative write store.
    fn channel_write_store(&self) -> Arc<dyn ChannelWriteStore>;
}

impl StoreResolver for LocalCacheModule {
    fn channel_store(&self) -> Arc<dyn ChannelStore> {
        self.resolve()
    }

    fn channel_write_store(&self) -> Arc<dyn ChannelWriteStore> {
        self.resolve()
    }
}

/// Trait for resolving cache components.
pub trait CacheResolver {
    /// Resolves the cache provider.
    fn cache_provider(&self) -> Arc<dyn CacheProvider>;
}

impl CacheResolver for LocalCacheModule {
    fn cache_provider(&self) -> Arc<dyn CacheProvider> {
        self.resolve()
    }
}

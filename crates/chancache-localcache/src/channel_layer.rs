//! Cache-aside layer over a [`ChannelStore`].
//!
//! [`LocalCacheChannelStore`] serves the hot channel reads from five named
//! in-process caches and falls through to the wrapped store on a miss.
//!
//! Read rules:
//! - `CacheMode::UseIfPresent` returns a cached value without touching the
//!   store; on a miss it asks the store and caches a successful answer.
//! - `CacheMode::Bypass` always asks the store and still caches a successful
//!   answer, so a forced read warms the cache for the next cache-first read.
//! - Store errors are returned unchanged and never cached.
//! - A failed cache write is dropped; the caller still gets the store's value.
//!
//! Cache coherence depends on writers calling the `invalidate_*` methods
//! (see [`crate::InvalidatingChannelWriter`]).

use crate::cache::{cache_keys, Cache, CacheExt, CacheOptions, CacheProvider};
use crate::metrics::{CacheMetrics, InvalidationKind};
use async_trait::async_trait;
use chancache_config::{CacheFamilyConfig, LocalCacheConfig};
use chancache_core::{
    CacheMode, Channel, ChannelId, ChannelMembers, ChancacheResult, TeamId, UserId,
};
use chancache_repository::ChannelStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Channel store decorator backed by local caches.
pub struct LocalCacheChannelStore {
    store: Arc<dyn ChannelStore>,
    member_counts: Arc<dyn Cache>,
    pinned_post_counts: Arc<dyn Cache>,
    guest_counts: Arc<dyn Cache>,
    channel_by_id: Arc<dyn Cache>,
    members_for_user: Arc<dyn Cache>,
}

impl LocalCacheChannelStore {
    /// Wraps `store`, creating one cache per family from `provider`.
    pub fn new(
        store: Arc<dyn ChannelStore>,
        provider: &dyn CacheProvider,
        config: &LocalCacheConfig,
    ) -> ChancacheResult<Self> {
        let build = |name: &str, family: CacheFamilyConfig| {
            provider.new_cache(&CacheOptions::new(name, family.size, family.expiry()))
        };

        let layer = Self {
            store,
            member_counts: build(cache_keys::MEMBER_COUNTS_CACHE, config.member_counts)?,
            pinned_post_counts: build(cache_keys::PINNED_POST_COUNTS_CACHE, config.pinned_post_counts)?,
            guest_counts: build(cache_keys::GUEST_COUNTS_CACHE, config.guest_counts)?,
            channel_by_id: build(cache_keys::CHANNEL_BY_ID_CACHE, config.channel_by_id)?,
            members_for_user: build(cache_keys::MEMBERS_FOR_USER_CACHE, config.members_for_user)?,
        };

        info!(
            "Channel cache layer ready using '{}' provider",
            provider.provider_name()
        );
        Ok(layer)
    }

    /// Returns the wrapped store.
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn ChannelStore> {
        &self.store
    }

    /// Cache-first member count that never fails.
    ///
    /// A store failure is logged and reported as 0.
    pub async fn get_member_count_from_cache(&self, channel_id: &ChannelId) -> i64 {
        match self.get_member_count(channel_id, CacheMode::UseIfPresent).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Failed to load member count for channel {}: {}", channel_id, e);
                0
            }
        }
    }

    /// Drops the cached member count of a channel.
    pub fn invalidate_member_count(&self, channel_id: &ChannelId) {
        Self::remove(&*self.member_counts, &cache_keys::member_count(channel_id));
    }

    /// Drops the cached pinned post count of a channel.
    pub fn invalidate_pinned_post_count(&self, channel_id: &ChannelId) {
        Self::remove(&*self.pinned_post_counts, &cache_keys::pinned_post_count(channel_id));
    }

    /// Drops the cached guest count of a channel.
    pub fn invalidate_guest_count(&self, channel_id: &ChannelId) {
        Self::remove(&*self.guest_counts, &cache_keys::guest_count(channel_id));
    }

    /// Drops the cached channel record.
    pub fn invalidate_channel(&self, channel_id: &ChannelId) {
        Self::remove(&*self.channel_by_id, &cache_keys::channel(channel_id));
    }

    /// Drops one user's cached membership list.
    pub fn invalidate_members_for_user(&self, user_id: &UserId) {
        Self::remove(&*self.members_for_user, &cache_keys::members_for_user(user_id));
    }

    /// Drops every cached membership list.
    pub fn invalidate_members_for_all_users(&self) {
        Self::purge(&*self.members_for_user);
    }

    /// Entry count per cache, in family order.
    #[must_use]
    pub fn entry_counts(&self) -> Vec<(String, u64)> {
        self.caches()
            .iter()
            .map(|cache| (cache.name().to_string(), cache.len()))
            .collect()
    }

    fn caches(&self) -> [&Arc<dyn Cache>; 5] {
        [
            &self.member_counts,
            &self.pinned_post_counts,
            &self.guest_counts,
            &self.channel_by_id,
            &self.members_for_user,
        ]
    }

    async fn read_through<T, F, Fut>(
        cache: &dyn Cache,
        key: String,
        mode: CacheMode,
        load: F,
    ) -> ChancacheResult<T>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = ChancacheResult<T>> + Send,
    {
        if mode.allows_cache() {
            if let Some(cached) = cache.get::<T>(&key) {
                debug!("Cache hit in '{}' for key '{}'", cache.name(), key);
                CacheMetrics::hit(cache.name());
                return Ok(cached);
            }
            debug!("Cache miss in '{}' for key '{}'", cache.name(), key);
            CacheMetrics::miss(cache.name());
        } else {
            debug!("Bypassing '{}' for key '{}'", cache.name(), key);
        }

        let value = load().await?;

        if let Err(e) = cache.put(&key, &value) {
            debug!("Discarded write to '{}' for key '{}': {}", cache.name(), key, e);
        }

        Ok(value)
    }

    fn remove(cache: &dyn Cache, key: &str) {
        cache.remove(key);
        CacheMetrics::invalidation(cache.name(), InvalidationKind::Remove);
        debug!("Invalidated key '{}' in '{}'", key, cache.name());
    }

    fn purge(cache: &dyn Cache) {
        cache.purge();
        CacheMetrics::invalidation(cache.name(), InvalidationKind::Purge);
        info!("Purged cache '{}'", cache.name());
    }
}

#[async_trait]
impl ChannelStore for LocalCacheChannelStore {
    async fn get_member_count(&self, channel_id: &ChannelId, mode: CacheMode) -> ChancacheResult<i64> {
        Self::read_through(
            &*self.member_counts,
            cache_keys::member_count(channel_id),
            mode,
            || self.store.get_member_count(channel_id, mode),
        )
        .await
    }

    async fn get_pinned_post_count(&self, channel_id: &ChannelId, mode: CacheMode) -> ChancacheResult<i64> {
        Self::read_through(
            &*self.pinned_post_counts,
            cache_keys::pinned_post_count(channel_id),
            mode,
            || self.store.get_pinned_post_count(channel_id, mode),
        )
        .await
    }

    async fn get_guest_count(&self, channel_id: &ChannelId, mode: CacheMode) -> ChancacheResult<i64> {
        Self::read_through(
            &*self.guest_counts,
            cache_keys::guest_count(channel_id),
            mode,
            || self.store.get_guest_count(channel_id, mode),
        )
        .await
    }

    async fn get(&self, channel_id: &ChannelId, mode: CacheMode) -> ChancacheResult<Channel> {
        Self::read_through(
            &*self.channel_by_id,
            cache_keys::channel(channel_id),
            mode,
            || self.store.get(channel_id, mode),
        )
        .await
    }

    async fn get_members_for_user(&self, team_id: &TeamId, user_id: &UserId) -> ChancacheResult<ChannelMembers> {
        Self::read_through(
            &*self.members_for_user,
            cache_keys::members_for_user(user_id),
            CacheMode::UseIfPresent,
            || self.store.get_members_for_user(team_id, user_id),
        )
        .await
    }

    fn clear_caches(&self) {
        for cache in self.caches() {
            Self::purge(&**cache);
        }
        self.store.clear_caches();
    }
}

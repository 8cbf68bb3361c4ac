//! Common test infrastructure for cache layer tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chancache_config::LocalCacheConfig;
use chancache_core::{
    CacheMode, Channel, ChannelId, ChannelMember, ChannelMembers, ChannelType, ChancacheError,
    ChancacheResult, TeamId, UserId,
};
use chancache_localcache::{LocalCacheChannelStore, MokaCacheProvider};
use chancache_repository::ChannelStore;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Value every count operation answers with by default.
pub const COUNT_RESULT: i64 = 10;

/// Store double that counts calls per operation and can be told to fail.
pub struct CountingChannelStore {
    member_count_calls: AtomicUsize,
    pinned_post_count_calls: AtomicUsize,
    guest_count_calls: AtomicUsize,
    get_calls: AtomicUsize,
    members_for_user_calls: AtomicUsize,
    clear_caches_calls: AtomicUsize,
    count: AtomicI64,
    channel: Mutex<Channel>,
    members: Mutex<ChannelMembers>,
    failing: AtomicBool,
}

impl CountingChannelStore {
    pub fn new() -> Arc<Self> {
        let channel = Channel::new(TeamId::new("team"), ChannelType::Open, "town-square", "Town Square")
            .with_id("id");
        let members = vec![ChannelMember::new(ChannelId::new("id"), UserId::new("u1"))];

        Arc::new(Self {
            member_count_calls: AtomicUsize::new(0),
            pinned_post_count_calls: AtomicUsize::new(0),
            guest_count_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
            members_for_user_calls: AtomicUsize::new(0),
            clear_caches_calls: AtomicUsize::new(0),
            count: AtomicI64::new(COUNT_RESULT),
            channel: Mutex::new(channel),
            members: Mutex::new(members),
            failing: AtomicBool::new(false),
        })
    }

    pub fn member_count_calls(&self) -> usize {
        self.member_count_calls.load(Ordering::SeqCst)
    }

    pub fn pinned_post_count_calls(&self) -> usize {
        self.pinned_post_count_calls.load(Ordering::SeqCst)
    }

    pub fn guest_count_calls(&self) -> usize {
        self.guest_count_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn members_for_user_calls(&self) -> usize {
        self.members_for_user_calls.load(Ordering::SeqCst)
    }

    pub fn clear_caches_calls(&self) -> usize {
        self.clear_caches_calls.load(Ordering::SeqCst)
    }

    /// Changes the value all count operations answer with.
    pub fn set_count(&self, count: i64) {
        self.count.store(count, Ordering::SeqCst);
    }

    /// Changes the display name of the channel returned by `get`.
    pub fn rename_channel(&self, display_name: &str) {
        self.channel.lock().unwrap().display_name = display_name.to_string();
    }

    /// Replaces the membership list returned by `get_members_for_user`.
    pub fn set_members(&self, members: ChannelMembers) {
        *self.members.lock().unwrap() = members;
    }

    /// Makes every subsequent read fail with a database error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> ChancacheResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ChancacheError::Database("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChannelStore for CountingChannelStore {
    async fn get_member_count(&self, _channel_id: &ChannelId, _mode: CacheMode) -> ChancacheResult<i64> {
        self.member_count_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.count.load(Ordering::SeqCst))
    }

    async fn get_pinned_post_count(&self, _channel_id: &ChannelId, _mode: CacheMode) -> ChancacheResult<i64> {
        self.pinned_post_count_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.count.load(Ordering::SeqCst))
    }

    async fn get_guest_count(&self, _channel_id: &ChannelId, _mode: CacheMode) -> ChancacheResult<i64> {
        self.guest_count_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.count.load(Ordering::SeqCst))
    }

    async fn get(&self, channel_id: &ChannelId, _mode: CacheMode) -> ChancacheResult<Channel> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let channel = self.channel.lock().unwrap().clone();
        if &channel.id == channel_id {
            Ok(channel)
        } else {
            Err(ChancacheError::not_found("Channel", channel_id))
        }
    }

    async fn get_members_for_user(&self, _team_id: &TeamId, _user_id: &UserId) -> ChancacheResult<ChannelMembers> {
        self.members_for_user_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.members.lock().unwrap().clone())
    }

    fn clear_caches(&self) {
        self.clear_caches_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Wraps `store` in a cache layer with default settings.
pub fn cached(store: &Arc<CountingChannelStore>) -> LocalCacheChannelStore {
    cached_with(store, MokaCacheProvider::default())
}

/// Wraps `store` in a cache layer built by `provider`.
pub fn cached_with(store: &Arc<CountingChannelStore>, provider: MokaCacheProvider) -> LocalCacheChannelStore {
    LocalCacheChannelStore::new(store.clone(), &provider, &LocalCacheConfig::default())
        .expect("cache layer should build")
}

pub fn id() -> ChannelId {
    ChannelId::new("id")
}

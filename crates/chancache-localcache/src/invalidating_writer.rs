//! Write path that keeps the channel caches coherent.

use crate::LocalCacheChannelStore;
use async_trait::async_trait;
use chancache_core::{
    CacheMode, Channel, ChannelId, ChannelMember, ChancacheResult, PostId, UserId,
};
use chancache_repository::{ChannelStore, ChannelWriteStore};
use std::sync::Arc;

/// [`ChannelWriteStore`] that invalidates the affected cache entries after
/// every successful write.
///
/// A failed write leaves the caches untouched.
pub struct InvalidatingChannelWriter {
    store: Arc<dyn ChannelWriteStore>,
    cache: Arc<LocalCacheChannelStore>,
}

impl InvalidatingChannelWriter {
    /// Creates a writer over `store` that invalidates `cache`.
    #[must_use]
    pub fn new(store: Arc<dyn ChannelWriteStore>, cache: Arc<LocalCacheChannelStore>) -> Self {
        Self { store, cache }
    }

    fn invalidate_membership(&self, channel_id: &ChannelId, user_id: &UserId) {
        self.cache.invalidate_member_count(channel_id);
        self.cache.invalidate_guest_count(channel_id);
        self.cache.invalidate_members_for_user(user_id);
    }

    /// Whether saving `channel` may change which channels its members see.
    ///
    /// Member lists are filtered by team, so a team move affects every member.
    /// A new channel has no members yet. A failed lookup counts as a move.
    async fn team_may_change(&self, channel: &Channel) -> bool {
        match self.cache.inner().get(&channel.id, CacheMode::Bypass).await {
            Ok(prior) => prior.team_id != channel.team_id,
            Err(err) => !err.is_not_found(),
        }
    }
}

#[async_trait]
impl ChannelWriteStore for InvalidatingChannelWriter {
    async fn save_channel(&self, channel: &Channel) -> ChancacheResult<Channel> {
        let team_may_change = self.team_may_change(channel).await;
        let saved = self.store.save_channel(channel).await?;
        self.cache.invalidate_channel(&saved.id);
        if team_may_change {
            self.cache.invalidate_members_for_all_users();
        }
        Ok(saved)
    }

    async fn delete_channel(&self, channel_id: &ChannelId) -> ChancacheResult<()> {
        self.store.delete_channel(channel_id).await?;
        self.cache.invalidate_channel(channel_id);
        self.cache.invalidate_member_count(channel_id);
        self.cache.invalidate_guest_count(channel_id);
        self.cache.invalidate_pinned_post_count(channel_id);
        // Every member's list may have included this channel
        self.cache.invalidate_members_for_all_users();
        Ok(())
    }

    async fn save_member(&self, member: &ChannelMember) -> ChancacheResult<ChannelMember> {
        let saved = self.store.save_member(member).await?;
        self.invalidate_membership(&saved.channel_id, &saved.user_id);
        Ok(saved)
    }

    async fn remove_member(&self, channel_id: &ChannelId, user_id: &UserId) -> ChancacheResult<bool> {
        let removed = self.store.remove_member(channel_id, user_id).await?;
        self.invalidate_membership(channel_id, user_id);
        Ok(removed)
    }

    async fn pin_post(&self, channel_id: &ChannelId, post_id: &PostId) -> ChancacheResult<bool> {
        let pinned = self.store.pin_post(channel_id, post_id).await?;
        self.cache.invalidate_pinned_post_count(channel_id);
        Ok(pinned)
    }

    async fn unpin_post(&self, channel_id: &ChannelId, post_id: &PostId) -> ChancacheResult<bool> {
        let unpinned = self.store.unpin_post(channel_id, post_id).await?;
        self.cache.invalidate_pinned_post_count(channel_id);
        Ok(unpinned)
    }
}

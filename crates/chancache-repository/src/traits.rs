//! Channel store trait definitions.

use chancache_core::{
    CacheMode, Channel, ChannelId, ChannelMember, ChannelMembers, ChancacheResult, Interface,
    PostId, TeamId, UserId,
};
use async_trait::async_trait;

/// Read side of the authoritative channel store.
///
/// Caching layers implement this trait too, so a cached store is a drop-in
/// replacement for the store it wraps. Plain stores ignore `mode`.
#[async_trait]
pub trait ChannelStore: Interface + Send + Sync {
    /// Counts the members of a channel.
    async fn get_member_count(&self, channel_id: &ChannelId, mode: CacheMode) -> ChancacheResult<i64>;

    /// Counts the pinned posts of a channel.
    async fn get_pinned_post_count(&self, channel_id: &ChannelId, mode: CacheMode) -> ChancacheResult<i64>;

    /// Counts the guest members of a channel.
    async fn get_guest_count(&self, channel_id: &ChannelId, mode: CacheMode) -> ChancacheResult<i64>;

    /// Finds a channel by id.
    ///
    /// Returns `ChancacheError::NotFound` if the channel does not exist.
    async fn get(&self, channel_id: &ChannelId, mode: CacheMode) -> ChancacheResult<Channel>;

    /// Lists a user's memberships in the team's channels and in team-less
    /// (direct and group) channels, ordered by channel id.
    async fn get_members_for_user(&self, team_id: &TeamId, user_id: &UserId) -> ChancacheResult<ChannelMembers>;

    /// Drops any caches held by this store.
    fn clear_caches(&self) {}
}

/// Write side of the authoritative channel store.
#[async_trait]
pub trait ChannelWriteStore: Interface + Send + Sync {
    /// Inserts or replaces a channel.
    async fn save_channel(&self, channel: &Channel) -> ChancacheResult<Channel>;

    /// Deletes a channel together with its memberships and pins.
    async fn delete_channel(&self, channel_id: &ChannelId) -> ChancacheResult<()>;

    /// Inserts or replaces a membership.
    async fn save_member(&self, member: &ChannelMember) -> ChancacheResult<ChannelMember>;

    /// Removes a membership. Returns `true` if it existed.
    async fn remove_member(&self, channel_id: &ChannelId, user_id: &UserId) -> ChancacheResult<bool>;

    /// Pins a post to a channel. Returns `true` if it was not pinned yet.
    async fn pin_post(&self, channel_id: &ChannelId, post_id: &PostId) -> ChancacheResult<bool>;

    /// Unpins a post. Returns `true` if it was pinned.
    async fn unpin_post(&self, channel_id: &ChannelId, post_id: &PostId) -> ChancacheResult<bool>;
}

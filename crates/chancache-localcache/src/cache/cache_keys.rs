//! Cache names and key generators for the channel cache families.
//!
//! Each family lives in its own named cache, so keys are the bare id.

use chancache_core::{ChannelId, UserId};

/// Cache of member counts per channel.
pub const MEMBER_COUNTS_CACHE: &str = "ChannelMemberCounts";

/// Cache of pinned post counts per channel.
pub const PINNED_POST_COUNTS_CACHE: &str = "ChannelPinnedPostsCounts";

/// Cache of guest counts per channel.
pub const GUEST_COUNTS_CACHE: &str = "ChannelGuestsCount";

/// Cache of channel records by id.
pub const CHANNEL_BY_ID_CACHE: &str = "channelById";

/// Cache of membership lists per user.
pub const MEMBERS_FOR_USER_CACHE: &str = "ChannelMembersForUser";

/// Generate the member count key for a channel.
#[must_use]
pub fn member_count(channel_id: &ChannelId) -> String {
    channel_id.to_string()
}

/// Generate the pinned post count key for a channel.
#[must_use]
pub fn pinned_post_count(channel_id: &ChannelId) -> String {
    channel_id.to_string()
}

/// Generate the guest count key for a channel.
#[must_use]
pub fn guest_count(channel_id: &ChannelId) -> String {
    channel_id.to_string()
}

/// Generate the channel record key.
#[must_use]
pub fn channel(channel_id: &ChannelId) -> String {
    channel_id.to_string()
}

/// Generate the membership list key for a user.
///
/// The team is not part of the key.
#[must_use]
pub fn members_for_user(user_id: &UserId) -> String {
    user_id.to_string()
}

//! In-memory authoritative channel store.
//!
//! One [`MemoryChannelState`] is shared by a read handle
//! ([`MemoryChannelStore`]) and a write handle ([`MemoryChannelWriteStore`]),
//! so the two can be registered as separate DI components.

use crate::{ChannelStore, ChannelWriteStore};
use async_trait::async_trait;
use chancache_core::{
    CacheMode, Channel, ChannelId, ChannelMember, ChannelMembers, ChancacheError, ChancacheResult,
    PostId, TeamId, UserId,
};
use parking_lot::RwLock;
use shaku::Component;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Shared tables behind the memory store handles.
#[derive(Debug, Default)]
pub struct MemoryChannelState {
    channels: RwLock<HashMap<ChannelId, Channel>>,
    members: RwLock<HashMap<ChannelId, BTreeMap<UserId, ChannelMember>>>,
    pinned: RwLock<HashMap<ChannelId, BTreeSet<PostId>>>,
}

impl MemoryChannelState {
    /// Creates empty shared state.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn ensure_channel(&self, channel_id: &ChannelId) -> ChancacheResult<()> {
        if self.channels.read().contains_key(channel_id) {
            Ok(())
        } else {
            Err(ChancacheError::not_found("Channel", channel_id))
        }
    }

    fn member_count(&self, channel_id: &ChannelId) -> i64 {
        self.members
            .read()
            .get(channel_id)
            .map_or(0, |m| m.len() as i64)
    }

    fn guest_count(&self, channel_id: &ChannelId) -> i64 {
        self.members
            .read()
            .get(channel_id)
            .map_or(0, |m| m.values().filter(|member| member.is_guest()).count() as i64)
    }

    fn pinned_count(&self, channel_id: &ChannelId) -> i64 {
        self.pinned
            .read()
            .get(channel_id)
            .map_or(0, |p| p.len() as i64)
    }

    fn channel(&self, channel_id: &ChannelId) -> ChancacheResult<Channel> {
        self.channels
            .read()
            .get(channel_id)
            .cloned()
            .ok_or_else(|| ChancacheError::not_found("Channel", channel_id))
    }

    fn members_for_user(&self, team_id: &TeamId, user_id: &UserId) -> ChannelMembers {
        let channels = self.channels.read();
        let members = self.members.read();

        let mut result: ChannelMembers = members
            .iter()
            .filter(|(channel_id, _)| {
                channels
                    .get(*channel_id)
                    .is_some_and(|c| c.is_visible_in_team(team_id))
            })
            .filter_map(|(_, by_user)| by_user.get(user_id).cloned())
            .collect();
        result.sort_by(|a, b| a.channel_id.cmp(&b.channel_id));
        result
    }

    fn save_channel(&self, channel: &Channel) -> ChancacheResult<Channel> {
        if channel.name.trim().is_empty() {
            return Err(ChancacheError::validation("Channel name must not be empty"));
        }
        self.channels.write().insert(channel.id.clone(), channel.clone());
        Ok(channel.clone())
    }

    fn delete_channel(&self, channel_id: &ChannelId) -> ChancacheResult<()> {
        if self.channels.write().remove(channel_id).is_none() {
            return Err(ChancacheError::not_found("Channel", channel_id));
        }
        self.members.write().remove(channel_id);
        self.pinned.write().remove(channel_id);
        Ok(())
    }

    fn save_member(&self, member: &ChannelMember) -> ChancacheResult<ChannelMember> {
        self.ensure_channel(&member.channel_id)?;
        self.members
            .write()
            .entry(member.channel_id.clone())
            .or_default()
            .insert(member.user_id.clone(), member.clone());
        Ok(member.clone())
    }

    fn remove_member(&self, channel_id: &ChannelId, user_id: &UserId) -> bool {
        self.members
            .write()
            .get_mut(channel_id)
            .is_some_and(|by_user| by_user.remove(user_id).is_some())
    }

    fn pin_post(&self, channel_id: &ChannelId, post_id: &PostId) -> ChancacheResult<bool> {
        self.ensure_channel(channel_id)?;
        Ok(self
            .pinned
            .write()
            .entry(channel_id.clone())
            .or_default()
            .insert(post_id.clone()))
    }

    fn unpin_post(&self, channel_id: &ChannelId, post_id: &PostId) -> bool {
        self.pinned
            .write()
            .get_mut(channel_id)
            .is_some_and(|pins| pins.remove(post_id))
    }
}

/// Read handle over [`MemoryChannelState`].
#[derive(Component, Clone)]
#[shaku(interface = ChannelStore)]
pub struct MemoryChannelStore {
    state: Arc<MemoryChannelState>,
}

impl MemoryChannelStore {
    /// Creates a read handle over shared state.
    #[must_use]
    pub fn new(state: Arc<MemoryChannelState>) -> Self {
        Self { state }
    }

    /// Returns the shared state.
    #[must_use]
    pub fn state(&self) -> Arc<MemoryChannelState> {
        Arc::clone(&self.state)
    }
}

#[async_trait]
impl ChannelStore for MemoryChannelStore {
    async fn get_member_count(&self, channel_id: &ChannelId, _mode: CacheMode) -> ChancacheResult<i64> {
        Ok(self.state.member_count(channel_id))
    }

    async fn get_pinned_post_count(&self, channel_id: &ChannelId, _mode: CacheMode) -> ChancacheResult<i64> {
        Ok(self.state.pinned_count(channel_id))
    }

    async fn get_guest_count(&self, channel_id: &ChannelId, _mode: CacheMode) -> ChancacheResult<i64> {
        Ok(self.state.guest_count(channel_id))
    }

    async fn get(&self, channel_id: &ChannelId, _mode: CacheMode) -> ChancacheResult<Channel> {
        self.state.channel(channel_id)
    }

    async fn get_members_for_user(&self, team_id: &TeamId, user_id: &UserId) -> ChancacheResult<ChannelMembers> {
        Ok(self.state.members_for_user(team_id, user_id))
    }
}

/// Write handle over [`MemoryChannelState`].
#[derive(Component, Clone)]
#[shaku(interface = ChannelWriteStore)]
pub struct MemoryChannelWriteStore {
    state: Arc<MemoryChannelState>,
}

impl MemoryChannelWriteStore {
    /// Creates a write handle over shared state.
    #[must_use]
    pub fn new(state: Arc<MemoryChannelState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl ChannelWriteStore for MemoryChannelWriteStore {
    async fn save_channel(&self, channel: &Channel) -> ChancacheResult<Channel> {
        debug!("Saving channel: {}", channel.id);
        self.state.save_channel(channel)
    }

    async fn delete_channel(&self, channel_id: &ChannelId) -> ChancacheResult<()> {
        debug!("Deleting channel: {}", channel_id);
        self.state.delete_channel(channel_id)
    }

    async fn save_member(&self, member: &ChannelMember) -> ChancacheResult<ChannelMember> {
        debug!("Saving member {} in channel {}", member.user_id, member.channel_id);
        self.state.save_member(member)
    }

    async fn remove_member(&self, channel_id: &ChannelId, user_id: &UserId) -> ChancacheResult<bool> {
        debug!("Removing member {} from channel {}", user_id, channel_id);
        Ok(self.state.remove_member(channel_id, user_id))
    }

    async fn pin_post(&self, channel_id: &ChannelId, post_id: &PostId) -> ChancacheResult<bool> {
        self.state.pin_post(channel_id, post_id)
    }

    async fn unpin_post(&self, channel_id: &ChannelId, post_id: &PostId) -> ChancacheResult<bool> {
        Ok(self.state.unpin_post(channel_id, post_id))
    }
}

/// Creates a read and a write handle over fresh shared state.
#[must_use]
pub fn memory_channel_store() -> (MemoryChannelStore, MemoryChannelWriteStore) {
    let state = MemoryChannelState::new_shared();
    (
        MemoryChannelStore::new(Arc::clone(&state)),
        MemoryChannelWriteStore::new(state),
    )
}

//! Channel entity.

use crate::{ChannelId, TeamId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visibility and membership model of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// Public channel anyone on the team can join.
    #[default]
    Open,
    /// Invite-only channel.
    Private,
    /// One-to-one conversation, not owned by a team.
    Direct,
    /// Group conversation, not owned by a team.
    Group,
}

impl ChannelType {
    /// Direct and group channels live outside any team.
    #[must_use]
    pub const fn is_team_less(&self) -> bool {
        matches!(self, Self::Direct | Self::Group)
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::Private => "private",
            Self::Direct => "direct",
            Self::Group => "group",
        };
        write!(f, "{}", s)
    }
}

/// Channel record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Unique identifier for the channel.
    pub id: ChannelId,

    /// Owning team; `None` for direct and group channels.
    pub team_id: Option<TeamId>,

    /// Channel type.
    pub channel_type: ChannelType,

    /// URL-safe unique name within the team.
    pub name: String,

    /// Human readable name.
    pub display_name: String,

    /// Channel header text.
    #[serde(default)]
    pub header: String,

    /// Channel purpose text.
    #[serde(default)]
    pub purpose: String,

    /// User who created the channel.
    pub creator_id: Option<UserId>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,

    /// Archive timestamp, if archived.
    pub deleted_at: Option<DateTime<Utc>>,

    /// Total number of posts ever made in the channel.
    pub total_msg_count: i64,

    /// Timestamp of the most recent post.
    pub last_post_at: Option<DateTime<Utc>>,
}

impl Channel {
    /// Creates a new team channel.
    #[must_use]
    pub fn new(
        team_id: TeamId,
        channel_type: ChannelType,
        name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ChannelId::generate(),
            team_id: Some(team_id),
            channel_type,
            name: name.into(),
            display_name: display_name.into(),
            header: String::new(),
            purpose: String::new(),
            creator_id: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            total_msg_count: 0,
            last_post_at: None,
        }
    }

    /// Creates a direct channel between two users.
    #[must_use]
    pub fn new_direct(user_a: &UserId, user_b: &UserId) -> Self {
        let (first, second) = if user_a <= user_b {
            (user_a, user_b)
        } else {
            (user_b, user_a)
        };
        let now = Utc::now();
        Self {
            id: ChannelId::generate(),
            team_id: None,
            channel_type: ChannelType::Direct,
            name: format!("{}__{}", first, second),
            display_name: String::new(),
            header: String::new(),
            purpose: String::new(),
            creator_id: Some(user_a.clone()),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            total_msg_count: 0,
            last_post_at: None,
        }
    }

    /// Sets a specific id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ChannelId>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the creator.
    #[must_use]
    pub fn with_creator(mut self, creator_id: UserId) -> Self {
        self.creator_id = Some(creator_id);
        self
    }

    /// Checks if the channel has been archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Checks if the channel belongs to `team_id` or to no team at all.
    #[must_use]
    pub fn is_visible_in_team(&self, team_id: &TeamId) -> bool {
        match &self.team_id {
            Some(owner) => owner == team_id,
            None => true,
        }
    }

    /// Archives the channel.
    pub fn archive(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Records a new post.
    pub fn record_post(&mut self, at: DateTime<Utc>) {
        self.total_msg_count += 1;
        self.last_post_at = Some(at);
    }
}

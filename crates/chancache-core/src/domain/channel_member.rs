//! Channel membership record.

use crate::{ChannelId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default notification level for a new membership.
pub const DEFAULT_NOTIFY_LEVEL: &str = "default";

/// A user's membership in one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMember {
    /// Channel the membership belongs to.
    pub channel_id: ChannelId,

    /// Member user.
    pub user_id: UserId,

    /// Space separated explicit roles.
    #[serde(default)]
    pub roles: String,

    /// Member joined as a guest.
    pub scheme_guest: bool,

    /// Member holds the scheme user role.
    pub scheme_user: bool,

    /// Member holds the scheme admin role.
    pub scheme_admin: bool,

    /// Posts the member has seen.
    pub msg_count: i64,

    /// Unread mentions.
    pub mention_count: i64,

    /// Last time the member viewed the channel.
    pub last_viewed_at: Option<DateTime<Utc>>,

    /// Notification preferences.
    #[serde(default)]
    pub notify_props: BTreeMap<String, String>,
}

impl ChannelMember {
    /// Creates a regular member.
    #[must_use]
    pub fn new(channel_id: ChannelId, user_id: UserId) -> Self {
        let mut notify_props = BTreeMap::new();
        notify_props.insert("desktop".to_string(), DEFAULT_NOTIFY_LEVEL.to_string());
        notify_props.insert("push".to_string(), DEFAULT_NOTIFY_LEVEL.to_string());
        notify_props.insert("mark_unread".to_string(), "all".to_string());

        Self {
            channel_id,
            user_id,
            roles: String::new(),
            scheme_guest: false,
            scheme_user: true,
            scheme_admin: false,
            msg_count: 0,
            mention_count: 0,
            last_viewed_at: None,
            notify_props,
        }
    }

    /// Creates a guest member.
    #[must_use]
    pub fn new_guest(channel_id: ChannelId, user_id: UserId) -> Self {
        let mut member = Self::new(channel_id, user_id);
        member.scheme_guest = true;
        member.scheme_user = false;
        member
    }

    /// Checks if the member is a guest.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        self.scheme_guest
    }

    /// Checks if the member is a channel admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.scheme_admin
    }
}

/// Ordered list of memberships, as returned for a user.
pub type ChannelMembers = Vec<ChannelMember>;

//! Application configuration structures.

use chancache_core::telemetry::LogFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Entry count shared by the per-channel count caches.
pub const CHANNEL_CACHE_SIZE: u64 = 25_000;

/// Entry count for the channel-by-id and members-for-user caches.
pub const CHANNEL_ENTITY_CACHE_SIZE: u64 = 5_000;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Local cache configuration.
    #[serde(default)]
    pub cache: LocalCacheConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "chancache".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Sizing and expiry for one cache family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheFamilyConfig {
    /// Maximum number of entries.
    pub size: u64,
    /// Entry lifetime in seconds. `0` disables expiry.
    pub expiry_secs: u64,
}

impl CacheFamilyConfig {
    /// Creates a family configuration.
    #[must_use]
    pub const fn new(size: u64, expiry_secs: u64) -> Self {
        Self { size, expiry_secs }
    }

    /// Returns the expiry as a Duration, if any.
    #[must_use]
    pub const fn expiry(&self) -> Option<Duration> {
        if self.expiry_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.expiry_secs))
        }
    }
}

/// Local (in-process) cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalCacheConfig {
    /// Wrap the store in the cache layer at all.
    pub enabled: bool,
    /// Largest serialized value a cache will accept, in bytes.
    pub max_value_bytes: usize,
    /// Channel member counts.
    pub member_counts: CacheFamilyConfig,
    /// Channel pinned post counts.
    pub pinned_post_counts: CacheFamilyConfig,
    /// Channel guest counts.
    pub guest_counts: CacheFamilyConfig,
    /// Channel records by id.
    pub channel_by_id: CacheFamilyConfig,
    /// Channel memberships by user.
    pub members_for_user: CacheFamilyConfig,
}

impl Default for LocalCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_value_bytes: 1024 * 1024, // 1MiB
            member_counts: CacheFamilyConfig::new(CHANNEL_CACHE_SIZE, 1800),
            pinned_post_counts: CacheFamilyConfig::new(CHANNEL_CACHE_SIZE, 1800),
            guest_counts: CacheFamilyConfig::new(CHANNEL_CACHE_SIZE, 1800),
            channel_by_id: CacheFamilyConfig::new(CHANNEL_ENTITY_CACHE_SIZE, 600),
            members_for_user: CacheFamilyConfig::new(CHANNEL_ENTITY_CACHE_SIZE, 900),
        }
    }
}

impl LocalCacheConfig {
    /// Returns every family with its config key, in a fixed order.
    #[must_use]
    pub fn families(&self) -> [(&'static str, CacheFamilyConfig); 5] {
        [
            ("member_counts", self.member_counts),
            ("pinned_post_counts", self.pinned_post_counts),
            ("guest_counts", self.guest_counts),
            ("channel_by_id", self.channel_by_id),
            ("members_for_user", self.members_for_user),
        ]
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: LogFormat,
    /// Enable metrics.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}

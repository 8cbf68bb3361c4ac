//! Read mode for cached store operations.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// How a read treats an existing cache entry.
///
/// Both modes write the fresh store result back into the cache on success;
/// they differ only in whether a present entry may answer the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Serve a cached value when one is present.
    #[default]
    UseIfPresent,
    /// Always read the store, then refresh the cache.
    Bypass,
}

impl CacheMode {
    /// Maps the legacy `allow_from_cache` flag onto a mode.
    #[must_use]
    pub const fn from_allow_cache(allow_from_cache: bool) -> Self {
        if allow_from_cache {
            Self::UseIfPresent
        } else {
            Self::Bypass
        }
    }

    /// Returns `true` if a cached entry may answer the read.
    #[must_use]
    pub const fn allows_cache(self) -> bool {
        matches!(self, Self::UseIfPresent)
    }
}

impl Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UseIfPresent => write!(f, "use_if_present"),
            Self::Bypass => write!(f, "bypass"),
        }
    }
}

//! Caching infrastructure for the channel layer.
//!
//! This module provides a named-cache abstraction with a Moka implementation.

mod cache_interface;
pub mod cache_keys;
mod moka_cache;

pub use cache_interface::{Cache, CacheExt, CacheOptions, CacheProvider};
pub use moka_cache::{MokaCache, MokaCacheProvider, MokaCacheProviderParameters, DEFAULT_MAX_VALUE_BYTES};

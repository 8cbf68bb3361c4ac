//! # Chancache Local Cache
//!
//! In-process cache-aside layer for the channel store.
//! Reads go through [`LocalCacheChannelStore`]; writes go through
//! [`InvalidatingChannelWriter`] so cached entries are dropped when the
//! data behind them changes.

pub mod cache;
pub mod channel_layer;
pub mod invalidating_writer;
pub mod metrics;

pub use cache::*;
pub use channel_layer::*;
pub use invalidating_writer::*;
pub use self::metrics::{register_metrics, CacheMetrics, InvalidationKind};

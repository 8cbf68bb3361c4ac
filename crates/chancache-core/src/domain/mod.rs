//! Channel domain records served by the store and held in the cache.

pub mod channel;
pub mod channel_member;

pub use channel::*;
pub use channel_member::*;

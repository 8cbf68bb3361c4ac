//! # Chancache App
//!
//! Dependency injection wiring for the channel cache layer, plus the
//! application builder and startup utilities used by the `chancache`
//! binary.

pub mod app;
pub mod di;
pub mod startup;

pub use app::{AppBuilder, AppReport};
pub use di::{build_channel_layer, build_module, ChannelLayer, LocalCacheModule};

//! # Chancache Repository
//!
//! Authoritative channel store contracts and the in-memory implementation.
//!
//! ```text
//! Caller
//!   ↓  Arc<dyn ChannelStore>        (read interface, cacheable)
//! LocalCacheChannelStore            (optional cache layer)
//!   ↓  Arc<dyn ChannelStore>
//! MemoryChannelStore                (authoritative store)
//!   ↑  shared MemoryChannelState
//! MemoryChannelWriteStore           (write interface)
//! ```

pub mod memory;
pub mod traits;

pub use memory::*;
pub use traits::*;

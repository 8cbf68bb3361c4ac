//! # Chancache Core
//!
//! Core types, typed ids, domain records and error definitions shared by
//! every layer of the channel cache workspace.

pub mod cache_mode;
pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;

pub use cache_mode::*;
pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;

// Re-export shaku for dependency injection
pub use shaku::{module, Component, HasComponent, Interface};

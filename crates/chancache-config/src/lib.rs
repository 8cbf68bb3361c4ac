//! # Chancache Config
//!
//! Configuration management for the channel cache layer.
//! Supports layered configuration from files and environment variables,
//! with runtime reload.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;

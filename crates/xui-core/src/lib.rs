//! Core constants shared across x-ui crates.
//!
//! This crate provides:
//! - Project metadata (install name, version)
//! - Default configuration values and environment variable names
//! - Error kind labels for structured logging

pub mod defaults;
pub mod errors;

pub use defaults::*;
pub use errors::*;

/// Install name. Fixed at build time; every derived path uses it.
pub const INSTALL_NAME: &str = "x-ui";
/// Project version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

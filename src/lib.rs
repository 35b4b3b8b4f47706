//! # x-ui
//!
//! Runtime core of the x-ui proxy control plane.
//!
//! ## Crates
//!
//! - [`xui_core`] - Shared defaults and error labels
//! - [`xui_config`] - Environment resolution and first-run files
//! - [`xui_database`] - SQLite store for users, inbounds and settings
//! - [`xui_traffic`] - Proxy traffic reconciliation

pub mod cli;
pub mod startup;

pub use xui_config as config;
pub use xui_core as core;
pub use xui_database as database;
pub use xui_traffic as traffic;

pub use startup::{StartupError, bootstrap};

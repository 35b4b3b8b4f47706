//! Configuration resolution and first-run bootstrap.
//!
//! [`Configuration`] is resolved once from the environment and then threaded
//! through constructors; nothing else in the workspace reads the environment.
//!
//! # Example
//!
//! ```no_run
//! use xui_config::{Configuration, ensure_default_config, ensure_directories};
//!
//! # fn example() -> Result<(), xui_config::BootstrapError> {
//! let config = Configuration::resolve();
//! ensure_directories(&config)?;
//! ensure_default_config(&config)?;
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod error;
mod settings;

pub use bootstrap::{default_config, ensure_default_config, ensure_directories};
pub use error::BootstrapError;
pub use settings::{Configuration, LogLevel, ParseLogLevelError};

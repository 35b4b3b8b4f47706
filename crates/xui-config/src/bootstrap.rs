//! First-run filesystem bootstrap.
//!
//! Both operations are idempotent: directories are created only when missing
//! and the default proxy config is written only when no file exists, so user
//! edits survive restarts.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::BootstrapError;
use crate::settings::Configuration;

const DEFAULT_CONFIG: &str = include_str!("default-config.json");

/// Embedded default proxy configuration.
pub fn default_config() -> &'static str {
    DEFAULT_CONFIG
}

/// Create the install directory and its logs subdirectory.
pub fn ensure_directories(config: &Configuration) -> Result<(), BootstrapError> {
    create_dir(&config.install_dir())?;
    create_dir(&config.logs_dir())?;
    Ok(())
}

/// Write the default proxy config unless a file already exists.
///
/// Returns `true` when a new file was written.
pub fn ensure_default_config(config: &Configuration) -> Result<bool, BootstrapError> {
    let path = config.config_path();
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }

    // create_new makes the existence check and the write a single step
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "config file present, leaving untouched");
            return Ok(false);
        }
        Err(e) => return Err(BootstrapError::filesystem(&path, e)),
    };

    file.write_all(DEFAULT_CONFIG.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| BootstrapError::filesystem(&path, e))?;

    info!(path = %path.display(), "default config written");
    Ok(true)
}

fn create_dir(path: &Path) -> Result<(), BootstrapError> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| BootstrapError::filesystem(path, e))?;
    debug!(path = %path.display(), "directory created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(default_config()).unwrap();
        assert!(value.get("inbounds").is_some());
        assert_eq!(value["api"]["tag"], "api");
    }
}

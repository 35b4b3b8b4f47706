//! First-run bootstrap of the install directory and store.

use thiserror::Error;
use tracing::info;
use xui_config::{BootstrapError, Configuration, ensure_default_config, ensure_directories};
use xui_database::{Store, StoreError, StoreOptions};

/// Startup-fatal failure.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StartupError {
    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bootstrap(e) => e.kind(),
            Self::Store(e) => e.kind(),
        }
    }
}

/// Prepare the install directory, default proxy config and store.
///
/// Safe to run on every start: existing files, tables and users are left
/// untouched.
pub async fn bootstrap(config: &Configuration) -> Result<Store, StartupError> {
    ensure_directories(config)?;
    ensure_default_config(config)?;

    let db_path = config.db_path();
    let options = StoreOptions::default().log_statements(config.is_debug());
    let store = Store::open(&db_path, options).await?;

    if let Err(e) = store.bootstrap().await {
        store.close().await;
        return Err(e.into());
    }

    info!(path = %db_path.display(), "store ready");
    Ok(store)
}

//! Bootstrap error types.

use std::path::PathBuf;

/// Bootstrap error.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// A directory or file could not be created.
    #[error("filesystem: {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BootstrapError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Error kind label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Filesystem { .. } => xui_core::ERROR_FILESYSTEM,
        }
    }
}

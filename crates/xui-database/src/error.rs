//! Store error types.

use std::path::PathBuf;

/// Store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Parent directory of the database file could not be created.
    #[error("create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Database could not be opened.
    #[error("open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// Schema migration for an entity could not complete.
    #[error("schema migration ({entity}): {message}")]
    Migration {
        entity: &'static str,
        message: String,
    },

    /// Record does not exist.
    #[error("not found")]
    NotFound,

    /// Adding traffic would push a counter of inbound `tag` past `i64::MAX`.
    #[error("traffic counter overflow for {tag}")]
    CounterOverflow { tag: String },

    /// Write violates a uniqueness constraint.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other database failure.
    #[error("query: {0}")]
    Query(#[from] sqlx::Error),
}

impl StoreError {
    pub(crate) fn migration<E: std::fmt::Display>(entity: &'static str, err: E) -> Self {
        Self::Migration {
            entity,
            message: err.to_string(),
        }
    }

    /// Map a write failure, turning unique violations into [`StoreError::Conflict`].
    pub(crate) fn write(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict(db.message().to_string())
            }
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Query(other),
        }
    }

    /// Whether this error means the record is absent rather than broken.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound | Self::Query(sqlx::Error::RowNotFound))
    }

    /// Error kind label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateDir { .. } | Self::Open { .. } => xui_core::ERROR_STORE_OPEN,
            Self::Migration { .. } => xui_core::ERROR_MIGRATION,
            Self::NotFound => xui_core::ERROR_NOT_FOUND,
            Self::CounterOverflow { .. } => xui_core::ERROR_OVERFLOW,
            Self::Conflict(_) | Self::Query(_) => xui_core::ERROR_PERSISTENCE,
        }
    }
}

//! Store handle, connection setup and startup initialization.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use tracing::{debug, info};
use xui_core::defaults;

use crate::error::StoreError;
use crate::queries;
use crate::schema::{self, EntitySchema};

/// Store connection options.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Log every SQL statement (debug mode only).
    pub log_statements: bool,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// How long a writer waits on a locked database.
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            log_statements: false,
            max_connections: defaults::DEFAULT_STORE_MAX_CONNECTIONS,
            busy_timeout: Duration::from_millis(defaults::DEFAULT_STORE_BUSY_TIMEOUT_MS),
        }
    }
}

impl StoreOptions {
    /// Builder: enable statement logging.
    pub fn log_statements(mut self, enabled: bool) -> Self {
        self.log_statements = enabled;
        self
    }

    /// Builder: set max connections.
    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    /// Builder: set busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }
}

/// Handle to the x-ui database.
///
/// Cloning shares the underlying pool. SQLite serializes writers, so
/// concurrent updates to the same row never interleave.
#[derive(Clone)]
pub struct Store {
    pub(crate) pool: SqlitePool,
}

impl Store {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// Missing parent directories are created first.
    pub async fn open(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let connect = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(options.busy_timeout)
            .foreign_keys(true);
        let connect = if options.log_statements {
            connect
        } else {
            connect.disable_statement_logging()
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections.max(1))
            .connect_with(connect)
            .await
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        info!(path = %path.display(), "store opened");
        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// Uses a single connection that is never recycled, since every
    /// in-memory connection is its own database.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let open_err = |source: sqlx::Error| StoreError::Open {
            path: ":memory:".into(),
            source,
        };
        let connect = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(open_err)?
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect)
            .await
            .map_err(open_err)?;

        Ok(Self { pool })
    }

    /// Apply the missing steps of `schema`.
    ///
    /// Returns the number of steps applied (0 when already current).
    pub async fn migrate(&self, schema: &EntitySchema) -> Result<usize, StoreError> {
        let entity = schema.entity;
        let fail = |e: sqlx::Error| StoreError::migration(entity, e);

        let mut tx = self.pool.begin().await.map_err(fail)?;

        sqlx::query(schema::CREATE_SCHEMA_VERSIONS)
            .execute(&mut *tx)
            .await
            .map_err(fail)?;

        let current: i64 = sqlx::query_scalar(schema::SELECT_SCHEMA_VERSION)
            .bind(entity)
            .fetch_optional(&mut *tx)
            .await
            .map_err(fail)?
            .unwrap_or(0);

        let target = schema.target_version();
        if current > target {
            return Err(StoreError::migration(
                entity,
                format!("database is at version {current}, this build knows {target}"),
            ));
        }
        if current == target {
            debug!(entity, version = current, "schema up to date");
            return Ok(0);
        }

        let pending = &schema.steps[current as usize..];
        for step in pending {
            sqlx::query(step).execute(&mut *tx).await.map_err(fail)?;
        }

        sqlx::query(schema::UPSERT_SCHEMA_VERSION)
            .bind(entity)
            .bind(target)
            .execute(&mut *tx)
            .await
            .map_err(fail)?;

        tx.commit().await.map_err(fail)?;

        info!(entity, from = current, to = target, "schema migrated");
        Ok(pending.len())
    }

    pub async fn migrate_users(&self) -> Result<usize, StoreError> {
        self.migrate(&schema::USERS).await
    }

    pub async fn migrate_inbounds(&self) -> Result<usize, StoreError> {
        self.migrate(&schema::INBOUNDS).await
    }

    pub async fn migrate_settings(&self) -> Result<usize, StoreError> {
        self.migrate(&schema::SETTINGS).await
    }

    /// Create the default administrator if no user exists.
    ///
    /// The count and the insert share one transaction. Returns `true` when
    /// the administrator was created.
    pub async fn seed_default_admin(&self) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let count: i64 = sqlx::query_scalar(queries::COUNT_USERS)
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            debug!(users = count, "users present, skipping admin seed");
            return Ok(false);
        }

        sqlx::query(queries::INSERT_USER)
            .bind(defaults::DEFAULT_ADMIN_USERNAME)
            .bind(defaults::DEFAULT_ADMIN_PASSWORD)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::write)?;

        tx.commit().await?;

        info!(
            username = defaults::DEFAULT_ADMIN_USERNAME,
            "default administrator created"
        );
        Ok(true)
    }

    /// Run the startup sequence: users schema, admin seed, inbounds schema,
    /// settings schema. Stops at the first failure.
    ///
    /// Returns `true` when the default administrator was created.
    pub async fn bootstrap(&self) -> Result<bool, StoreError> {
        self.migrate_users().await?;
        let seeded = self.seed_default_admin().await?;
        self.migrate_inbounds().await?;
        self.migrate_settings().await?;
        Ok(seeded)
    }

    /// Schema version recorded for `entity` (0 when never migrated).
    pub async fn schema_version(&self, entity: &str) -> Result<i64, StoreError> {
        sqlx::query(schema::CREATE_SCHEMA_VERSIONS)
            .execute(&self.pool)
            .await?;
        let version = sqlx::query_scalar(schema::SELECT_SCHEMA_VERSION)
            .bind(entity)
            .fetch_optional(&self.pool)
            .await?;
        Ok(version.unwrap_or(0))
    }

    /// Close the pool, waiting for in-flight queries.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("connections", &self.pool.size())
            .finish_non_exhaustive()
    }
}

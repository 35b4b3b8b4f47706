//! Versioned schema definitions.
//!
//! Each entity owns an ordered list of DDL steps. The number of steps applied
//! so far is stored per entity in `schema_versions`; [`Store::migrate`] runs
//! only the steps past that mark, so new steps must be appended, never edited.
//! Steps stay additive (`CREATE ... IF NOT EXISTS`, `ALTER TABLE ... ADD`) so
//! a database created before version tracking existed is adopted in place.
//!
//! [`Store::migrate`]: crate::Store::migrate

/// Ordered migration steps for one entity.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Entity name, used as the key in `schema_versions`.
    pub entity: &'static str,
    /// DDL statements, one per version.
    pub steps: &'static [&'static str],
}

impl EntitySchema {
    /// Version reached once every step is applied.
    pub fn target_version(&self) -> i64 {
        self.steps.len() as i64
    }
}

/// Bookkeeping table, created on demand by every migration.
pub(crate) const CREATE_SCHEMA_VERSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS schema_versions (
    entity TEXT PRIMARY KEY NOT NULL,
    version INTEGER NOT NULL
)
"#;

pub(crate) const SELECT_SCHEMA_VERSION: &str =
    "SELECT version FROM schema_versions WHERE entity = ?";

pub(crate) const UPSERT_SCHEMA_VERSION: &str = r#"
INSERT INTO schema_versions (entity, version) VALUES (?, ?)
ON CONFLICT(entity) DO UPDATE SET version = excluded.version
"#;

pub const USERS: EntitySchema = EntitySchema {
    entity: "users",
    steps: &[r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
    "#],
};

pub const INBOUNDS: EntitySchema = EntitySchema {
    entity: "inbounds",
    steps: &[
        r#"
        CREATE TABLE IF NOT EXISTS inbounds (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL DEFAULT 0,
            up INTEGER NOT NULL DEFAULT 0,
            down INTEGER NOT NULL DEFAULT 0,
            total INTEGER NOT NULL DEFAULT 0,
            remark TEXT NOT NULL DEFAULT '',
            enable INTEGER NOT NULL DEFAULT 1,
            expiry_time INTEGER NOT NULL DEFAULT 0,
            listen TEXT NOT NULL DEFAULT '',
            port INTEGER NOT NULL DEFAULT 0,
            protocol TEXT NOT NULL DEFAULT '',
            settings TEXT NOT NULL DEFAULT '{}',
            stream_settings TEXT NOT NULL DEFAULT '{}',
            tag TEXT NOT NULL UNIQUE,
            sniffing TEXT NOT NULL DEFAULT '{}'
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_inbounds_user_id ON inbounds(user_id)",
    ],
};

pub const SETTINGS: EntitySchema = EntitySchema {
    entity: "settings",
    steps: &[r#"
        CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            key TEXT NOT NULL UNIQUE,
            value TEXT NOT NULL DEFAULT ''
        )
    "#],
};

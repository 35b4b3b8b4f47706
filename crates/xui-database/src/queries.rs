//! SQL queries.

// ── users ─────────────────────────────────────────────────────────

pub const COUNT_USERS: &str = "SELECT COUNT(*) FROM users";

pub const INSERT_USER: &str = r#"
INSERT INTO users (username, password) VALUES (?, ?)
RETURNING id, username, password
"#;

pub const SELECT_USER_BY_ID: &str = "SELECT id, username, password FROM users WHERE id = ?";

pub const SELECT_USER_BY_USERNAME: &str =
    "SELECT id, username, password FROM users WHERE username = ?";

pub const UPDATE_USER: &str = "UPDATE users SET username = ?, password = ? WHERE id = ?";

// ── inbounds ──────────────────────────────────────────────────────

pub const SELECT_INBOUNDS: &str = r#"
SELECT id, user_id, up, down, total, remark, enable, expiry_time, listen, port,
       protocol, settings, stream_settings, tag, sniffing
FROM inbounds
ORDER BY id
"#;

pub const SELECT_INBOUND_BY_ID: &str = r#"
SELECT id, user_id, up, down, total, remark, enable, expiry_time, listen, port,
       protocol, settings, stream_settings, tag, sniffing
FROM inbounds
WHERE id = ?
"#;

pub const SELECT_INBOUND_BY_TAG: &str = r#"
SELECT id, user_id, up, down, total, remark, enable, expiry_time, listen, port,
       protocol, settings, stream_settings, tag, sniffing
FROM inbounds
WHERE tag = ?
"#;

pub const INSERT_INBOUND: &str = r#"
INSERT INTO inbounds (user_id, total, remark, enable, expiry_time, listen, port,
                      protocol, settings, stream_settings, tag, sniffing)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
RETURNING id, user_id, up, down, total, remark, enable, expiry_time, listen, port,
          protocol, settings, stream_settings, tag, sniffing
"#;

/// Touches configuration columns only; counters belong to the reconciler.
pub const UPDATE_INBOUND_CONFIG: &str = r#"
UPDATE inbounds
SET total = ?, remark = ?, enable = ?, expiry_time = ?, listen = ?, port = ?,
    protocol = ?, settings = ?, stream_settings = ?, sniffing = ?
WHERE id = ?
"#;

pub const DELETE_INBOUND: &str = "DELETE FROM inbounds WHERE id = ?";

/// Single-statement increment, atomic per row.
///
/// Rows whose sums would pass `i64::MAX` are left untouched; SQLite would
/// otherwise store the result as REAL.
pub const ADD_INBOUND_TRAFFIC: &str = r#"
UPDATE inbounds
SET up = up + ?1, down = down + ?2
WHERE tag = ?3
  AND up <= 9223372036854775807 - ?1
  AND down <= 9223372036854775807 - ?2
"#;

pub const INBOUND_TAG_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM inbounds WHERE tag = ?)";

pub const RESET_INBOUND_TRAFFIC: &str = "UPDATE inbounds SET up = 0, down = 0 WHERE id = ?";

// ── settings ──────────────────────────────────────────────────────

pub const SELECT_SETTINGS: &str = "SELECT id, key, value FROM settings ORDER BY id";

pub const SELECT_SETTING_VALUE: &str = "SELECT value FROM settings WHERE key = ?";

pub const UPSERT_SETTING: &str = r#"
INSERT INTO settings (key, value) VALUES (?, ?)
ON CONFLICT(key) DO UPDATE SET value = excluded.value
"#;

pub const DELETE_SETTING: &str = "DELETE FROM settings WHERE key = ?";

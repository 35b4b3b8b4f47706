//! Persisted entities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Panel account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

// Debug implementation (don't leak credentials)
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Proxy ingress definition with cumulative traffic counters.
///
/// `up` and `down` only ever grow through [`Store::add_inbound_traffic`]
/// and return to zero through [`Store::reset_inbound_traffic`].
///
/// [`Store::add_inbound_traffic`]: crate::Store::add_inbound_traffic
/// [`Store::reset_inbound_traffic`]: crate::Store::reset_inbound_traffic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Inbound {
    pub id: i64,
    pub user_id: i64,
    /// Uploaded bytes.
    pub up: i64,
    /// Downloaded bytes.
    pub down: i64,
    /// Traffic quota in bytes (0 = unlimited).
    pub total: i64,
    pub remark: String,
    pub enable: bool,
    /// Expiry as unix milliseconds (0 = never).
    pub expiry_time: i64,
    pub listen: String,
    pub port: u16,
    pub protocol: String,
    /// Protocol settings (JSON).
    pub settings: String,
    /// Transport settings (JSON).
    pub stream_settings: String,
    /// Unique key used by the proxy when reporting traffic.
    pub tag: String,
    /// Sniffing settings (JSON).
    pub sniffing: String,
}

/// Configuration fields of an inbound, editable by the admin layer.
///
/// Never includes the traffic counters or the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundConfig {
    pub total: i64,
    pub remark: String,
    pub enable: bool,
    pub expiry_time: i64,
    pub listen: String,
    pub port: u16,
    pub protocol: String,
    pub settings: String,
    pub stream_settings: String,
    pub sniffing: String,
}

impl Default for InboundConfig {
    fn default() -> Self {
        Self {
            total: 0,
            remark: String::new(),
            enable: true,
            expiry_time: 0,
            listen: String::new(),
            port: 0,
            protocol: String::new(),
            settings: "{}".to_string(),
            stream_settings: "{}".to_string(),
            sniffing: "{}".to_string(),
        }
    }
}

/// Data needed to create an inbound. Counters start at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInbound {
    pub user_id: i64,
    pub tag: String,
    #[serde(flatten)]
    pub config: InboundConfig,
}

impl NewInbound {
    pub fn new(user_id: i64, tag: impl Into<String>) -> Self {
        Self {
            user_id,
            tag: tag.into(),
            config: InboundConfig::default(),
        }
    }

    /// Builder: set the configuration fields.
    pub fn config(mut self, config: InboundConfig) -> Self {
        self.config = config;
        self
    }
}

/// Key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Setting {
    pub id: i64,
    pub key: String,
    pub value: String,
}

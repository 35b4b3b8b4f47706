//! Error kind labels for structured logging.
//!
//! These constants provide consistent error classification across all crates.

/// Filesystem error during bootstrap.
pub const ERROR_FILESYSTEM: &str = "filesystem";
/// Store could not be opened.
pub const ERROR_STORE_OPEN: &str = "store_open";
/// Schema migration failed.
pub const ERROR_MIGRATION: &str = "migration";
/// Proxy traffic query failed.
pub const ERROR_PROXY_QUERY: &str = "proxy_query";
/// Traffic sample referenced an inbound tag that does not exist.
pub const ERROR_UNKNOWN_TAG: &str = "unknown_inbound_tag";
/// Store write failed for a single record.
pub const ERROR_PERSISTENCE: &str = "persistence";
/// Traffic delta does not fit the stored counter type.
pub const ERROR_OVERFLOW: &str = "overflow";
/// Record lookup found nothing.
pub const ERROR_NOT_FOUND: &str = "not_found";

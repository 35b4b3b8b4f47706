//! Default configuration values.
//!
//! Centralized default constants for use across all crates.

// ============================================================================
// Environment
// ============================================================================

/// Enables debug mode when set to exactly `"true"`.
pub const ENV_DEBUG: &str = "XUI_DEBUG";
/// Log level override, consulted only when debug mode is off.
pub const ENV_LOG_LEVEL: &str = "XUI_LOG_LEVEL";
/// Base directory override (default [`DEFAULT_BASE_DIR`]).
pub const ENV_BASE_DIR: &str = "XUI_BASE_DIR";
/// Traffic reconciliation interval in seconds.
pub const ENV_TRAFFIC_INTERVAL: &str = "XUI_TRAFFIC_INTERVAL";
/// Base URL of the proxy stats API.
pub const ENV_PROXY_API: &str = "XUI_PROXY_API";

// ============================================================================
// Filesystem Layout
// ============================================================================

/// Directory under which `<name>/` is created.
pub const DEFAULT_BASE_DIR: &str = "/etc";
/// Proxy config file name inside the install directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Logs subdirectory name inside the install directory.
pub const LOGS_DIR_NAME: &str = "logs";

// ============================================================================
// Traffic Defaults
// ============================================================================

/// Default tick interval of the traffic scheduler in seconds.
pub const DEFAULT_TRAFFIC_INTERVAL_SECS: u64 = 10;
/// Default proxy stats API base URL.
pub const DEFAULT_PROXY_API: &str = "http://127.0.0.1:62789";
/// Default liveness probe timeout in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2000;
/// Default traffic query timeout in seconds.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Store Defaults
// ============================================================================

/// Username of the administrator created on first start.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Password of the administrator created on first start.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";
/// Maximum connections in the store pool.
pub const DEFAULT_STORE_MAX_CONNECTIONS: u32 = 4;
/// SQLite busy timeout in milliseconds.
pub const DEFAULT_STORE_BUSY_TIMEOUT_MS: u64 = 5000;

//! Process-wide configuration resolved from the environment.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use xui_core::defaults;

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known log level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLogLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ParseLogLevelError(s.to_string())),
        }
    }
}

/// Immutable process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    name: String,
    version: String,
    log_level: LogLevel,
    debug: bool,
    base_dir: PathBuf,
    traffic_interval: Duration,
    proxy_api: String,
}

impl Configuration {
    /// Resolve from the process environment.
    pub fn resolve() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary variable lookup.
    ///
    /// Never fails: missing or malformed values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug = lookup(defaults::ENV_DEBUG).as_deref() == Some("true");

        let log_level = if debug {
            LogLevel::Debug
        } else {
            lookup(defaults::ENV_LOG_LEVEL)
                .and_then(|v| v.parse().ok())
                .unwrap_or_default()
        };

        let base_dir = lookup(defaults::ENV_BASE_DIR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(defaults::DEFAULT_BASE_DIR), PathBuf::from);

        let traffic_interval_secs = lookup(defaults::ENV_TRAFFIC_INTERVAL)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults::DEFAULT_TRAFFIC_INTERVAL_SECS);

        let proxy_api = lookup(defaults::ENV_PROXY_API)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| defaults::DEFAULT_PROXY_API.to_string());

        Self {
            name: xui_core::INSTALL_NAME.to_string(),
            version: xui_core::VERSION.to_string(),
            log_level,
            debug,
            base_dir,
            traffic_interval: Duration::from_secs(traffic_interval_secs),
            proxy_api,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `<base>/<name>`
    pub fn install_dir(&self) -> PathBuf {
        self.base_dir.join(&self.name)
    }

    /// `<base>/<name>/<name>.db`
    pub fn db_path(&self) -> PathBuf {
        self.install_dir().join(format!("{}.db", self.name))
    }

    /// `<base>/<name>/config.json`
    pub fn config_path(&self) -> PathBuf {
        self.install_dir().join(defaults::CONFIG_FILE_NAME)
    }

    /// `<base>/<name>/logs`
    pub fn logs_dir(&self) -> PathBuf {
        self.install_dir().join(defaults::LOGS_DIR_NAME)
    }

    pub fn traffic_interval(&self) -> Duration {
        self.traffic_interval
    }

    pub fn proxy_api(&self) -> &str {
        &self.proxy_api
    }

    /// Builder: override the traffic interval. Zero is ignored.
    pub fn with_traffic_interval(mut self, interval: Duration) -> Self {
        if !interval.is_zero() {
            self.traffic_interval = interval;
        }
        self
    }

    /// Builder: override the proxy API base URL.
    pub fn with_proxy_api(mut self, url: impl Into<String>) -> Self {
        self.proxy_api = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn resolve_with(vars: &[(&str, &str)]) -> Configuration {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Configuration::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let config = resolve_with(&[]);
        assert_eq!(config.name(), "x-ui");
        assert_eq!(config.log_level(), LogLevel::Info);
        assert!(!config.is_debug());
        assert_eq!(config.db_path(), PathBuf::from("/etc/x-ui/x-ui.db"));
        assert_eq!(config.config_path(), PathBuf::from("/etc/x-ui/config.json"));
        assert_eq!(config.logs_dir(), PathBuf::from("/etc/x-ui/logs"));
        assert_eq!(config.traffic_interval(), Duration::from_secs(10));
        assert_eq!(config.proxy_api(), "http://127.0.0.1:62789");
    }

    #[test]
    fn debug_forces_debug_level() {
        let config = resolve_with(&[("XUI_DEBUG", "true"), ("XUI_LOG_LEVEL", "error")]);
        assert!(config.is_debug());
        assert_eq!(config.log_level(), LogLevel::Debug);
    }

    #[test]
    fn debug_flag_requires_exact_true() {
        for value in ["TRUE", "1", "yes", " true", ""] {
            let config = resolve_with(&[("XUI_DEBUG", value)]);
            assert!(!config.is_debug(), "{value:?} must not enable debug");
            assert_eq!(config.log_level(), LogLevel::Info);
        }
    }

    #[test]
    fn log_level_override() {
        let config = resolve_with(&[("XUI_LOG_LEVEL", "warn")]);
        assert_eq!(config.log_level(), LogLevel::Warn);

        let config = resolve_with(&[("XUI_LOG_LEVEL", "ERROR")]);
        assert_eq!(config.log_level(), LogLevel::Error);
    }

    #[test]
    fn invalid_log_level_falls_back_to_info() {
        let config = resolve_with(&[("XUI_LOG_LEVEL", "verbose")]);
        assert_eq!(config.log_level(), LogLevel::Info);
    }

    #[test]
    fn base_dir_override_moves_every_path() {
        let config = resolve_with(&[("XUI_BASE_DIR", "/opt/panel")]);
        assert_eq!(config.install_dir(), PathBuf::from("/opt/panel/x-ui"));
        assert_eq!(config.db_path(), PathBuf::from("/opt/panel/x-ui/x-ui.db"));
    }

    #[test]
    fn invalid_interval_falls_back() {
        for value in ["0", "-5", "soon"] {
            let config = resolve_with(&[("XUI_TRAFFIC_INTERVAL", value)]);
            assert_eq!(config.traffic_interval(), Duration::from_secs(10));
        }
        let config = resolve_with(&[("XUI_TRAFFIC_INTERVAL", "30")]);
        assert_eq!(config.traffic_interval(), Duration::from_secs(30));
    }

    #[test]
    fn builders_override() {
        let config = resolve_with(&[])
            .with_traffic_interval(Duration::ZERO)
            .with_proxy_api("http://127.0.0.1:9000");
        assert_eq!(config.traffic_interval(), Duration::from_secs(10));
        assert_eq!(config.proxy_api(), "http://127.0.0.1:9000");
    }

    #[test]
    fn log_level_parse() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" Debug ".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("trace".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Error.to_string(), "error");
    }
}

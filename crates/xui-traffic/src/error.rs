//! Traffic error types.

use xui_database::StoreError;

/// Failure to query the proxy.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request could not be sent or timed out.
    #[error("http: {0}")]
    Http(String),

    /// Proxy answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),

    /// Response body was not a traffic report.
    #[error("decode: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Create an HTTP error from any error type.
    #[inline]
    pub fn http<E: std::fmt::Display>(err: E) -> Self {
        Self::Http(err.to_string())
    }
}

/// Failure to apply one traffic sample.
#[derive(Debug, thiserror::Error)]
pub enum TrafficError {
    /// No inbound carries the sample's tag.
    #[error("unknown inbound tag: {0}")]
    UnknownInboundTag(String),

    /// The counter update failed.
    #[error("persist traffic for {tag}: {source}")]
    Persistence {
        tag: String,
        #[source]
        source: StoreError,
    },

    /// Delta does not fit the stored counter.
    #[error("traffic delta for {tag} out of range")]
    Overflow { tag: String },
}

impl TrafficError {
    /// Tag of the sample that failed.
    pub fn tag(&self) -> &str {
        match self {
            Self::UnknownInboundTag(tag) | Self::Persistence { tag, .. } | Self::Overflow { tag } => {
                tag
            }
        }
    }

    /// Error kind label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownInboundTag(_) => xui_core::ERROR_UNKNOWN_TAG,
            Self::Persistence { .. } => xui_core::ERROR_PERSISTENCE,
            Self::Overflow { .. } => xui_core::ERROR_OVERFLOW,
        }
    }
}

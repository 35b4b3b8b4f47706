//! Per-inbound traffic delta.

use serde::{Deserialize, Serialize};

/// Bytes moved through one inbound since the previous report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSample {
    pub tag: String,
    pub up: u64,
    pub down: u64,
}

impl TrafficSample {
    pub fn new(tag: impl Into<String>, up: u64, down: u64) -> Self {
        Self {
            tag: tag.into(),
            up,
            down,
        }
    }
}

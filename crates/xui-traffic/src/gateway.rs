//! Proxy gateway trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::sample::TrafficSample;

/// Access to the running proxy process.
///
/// Implementations must be thread-safe (`Send + Sync`) and enforce their own
/// timeouts; the scheduler awaits every call to completion.
#[async_trait]
pub trait ProxyGateway: Send + Sync {
    /// Cheap liveness probe. Probe failures report `false`.
    async fn is_running(&self) -> bool;

    /// Traffic deltas since the last successful fetch, one per active inbound.
    async fn fetch_traffic(&self) -> Result<Vec<TrafficSample>, GatewayError>;
}

/// Blanket implementation for `Arc<G>` where `G: ProxyGateway`.
#[async_trait]
impl<G: ProxyGateway + ?Sized> ProxyGateway for Arc<G> {
    #[inline]
    async fn is_running(&self) -> bool {
        (**self).is_running().await
    }

    #[inline]
    async fn fetch_traffic(&self) -> Result<Vec<TrafficSample>, GatewayError> {
        (**self).fetch_traffic().await
    }
}

/// Blanket implementation for `Box<G>` where `G: ProxyGateway`.
#[async_trait]
impl<G: ProxyGateway + ?Sized> ProxyGateway for Box<G> {
    #[inline]
    async fn is_running(&self) -> bool {
        (**self).is_running().await
    }

    #[inline]
    async fn fetch_traffic(&self) -> Result<Vec<TrafficSample>, GatewayError> {
        (**self).fetch_traffic().await
    }
}

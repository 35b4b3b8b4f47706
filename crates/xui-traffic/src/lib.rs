//! Traffic reconciliation between the proxy and the store.
//!
//! Each tick the [`Scheduler`] asks a [`ProxyGateway`] whether the proxy is
//! up, pulls per-inbound [`TrafficSample`]s and hands them to the
//! [`Reconciler`], which adds them to the matching inbound counters.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use tokio_util::sync::CancellationToken;
//! use xui_database::{Store, StoreOptions};
//! use xui_traffic::{HttpGateway, Reconciler, Scheduler};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::open("/etc/x-ui/x-ui.db", StoreOptions::default()).await?;
//! let gateway = HttpGateway::new("http://127.0.0.1:62789")?;
//! let scheduler = Scheduler::new(gateway, Reconciler::new(store), Duration::from_secs(10));
//!
//! let shutdown = CancellationToken::new();
//! scheduler.spawn(shutdown.clone());
//! # Ok(())
//! # }
//! ```

mod error;
mod gateway;
pub mod http;
mod reconciler;
mod sample;
mod scheduler;

pub use error::{GatewayError, TrafficError};
pub use gateway::ProxyGateway;
pub use http::HttpGateway;
pub use reconciler::{ApplyReport, Reconciler};
pub use sample::TrafficSample;
pub use scheduler::{Scheduler, TickOutcome};

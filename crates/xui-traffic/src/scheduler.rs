//! Periodic traffic reconciliation loop.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures_util::FutureExt;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::gateway::ProxyGateway;
use crate::reconciler::Reconciler;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Proxy not running; nothing queried or written.
    ProxyDown,
    /// Traffic query failed; nothing written.
    FetchFailed,
    /// Samples were handed to the reconciler.
    Applied { applied: usize, failed: usize },
}

/// Drives one reconciliation per interval.
///
/// Ticks never overlap: the tick body is awaited inside the loop, and a tick
/// that overruns its interval delays the next one instead of stacking up.
#[derive(Debug)]
pub struct Scheduler<G> {
    gateway: G,
    reconciler: Reconciler,
    interval: Duration,
}

impl<G: ProxyGateway> Scheduler<G> {
    /// A zero interval is raised to one millisecond.
    pub fn new(gateway: G, reconciler: Reconciler, interval: Duration) -> Self {
        Self {
            gateway,
            reconciler,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single reconciliation. Never fails; problems are logged.
    pub async fn tick(&self) -> TickOutcome {
        if !self.gateway.is_running().await {
            trace!("proxy not running, skipping traffic tick");
            return TickOutcome::ProxyDown;
        }

        let samples = match self.gateway.fetch_traffic().await {
            Ok(samples) => samples,
            Err(e) => {
                warn!(kind = xui_core::ERROR_PROXY_QUERY, error = %e, "get proxy traffic failed");
                return TickOutcome::FetchFailed;
            }
        };

        let report = self.reconciler.apply_traffic(&samples).await;
        if report.is_clean() {
            debug!(applied = report.applied, "traffic reconciled");
        } else {
            warn!(
                applied = report.applied,
                failed = report.failed(),
                "add traffic finished with errors"
            );
        }

        TickOutcome::Applied {
            applied: report.applied,
            failed: report.failed(),
        }
    }

    /// Tick every interval until `shutdown` is cancelled.
    ///
    /// The first tick fires one interval after start. Cancellation is only
    /// observed between ticks, so an in-flight tick always completes. A tick
    /// that panics is logged and the loop carries on.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = self.interval.as_secs_f64(), "traffic scheduler started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    debug!("traffic scheduler shutting down");
                    return;
                }

                _ = ticker.tick() => {
                    if let Err(panic) = AssertUnwindSafe(self.tick()).catch_unwind().await {
                        error!(panic = panic_message(&*panic), "traffic tick panicked");
                    }
                }
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

impl<G: ProxyGateway + 'static> Scheduler<G> {
    /// Spawn [`run`](Self::run) onto the current runtime.
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}

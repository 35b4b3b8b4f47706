//! Applies traffic samples to inbound counters.

use tracing::warn;
use xui_database::{Store, StoreError};

use crate::error::TrafficError;
use crate::sample::TrafficSample;

/// Outcome of one [`Reconciler::apply_traffic`] call.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Samples written to the store.
    pub applied: usize,
    /// One entry per sample that was not written.
    pub errors: Vec<TrafficError>,
}

impl ApplyReport {
    /// No sample failed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}

/// Adds traffic deltas to inbound counters.
///
/// Every sample is its own atomic row update; a failing sample is recorded
/// and the rest of the batch still runs. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Reconciler {
    store: Store,
}

impl Reconciler {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Apply every sample, collecting per-sample failures.
    pub async fn apply_traffic(&self, samples: &[TrafficSample]) -> ApplyReport {
        let mut report = ApplyReport::default();

        for sample in samples {
            match self.apply_sample(sample).await {
                Ok(()) => report.applied += 1,
                Err(e) => {
                    warn!(
                        tag = %sample.tag,
                        kind = e.kind(),
                        error = %e,
                        "traffic sample not applied"
                    );
                    report.errors.push(e);
                }
            }
        }

        report
    }

    async fn apply_sample(&self, sample: &TrafficSample) -> Result<(), TrafficError> {
        let overflow = || TrafficError::Overflow {
            tag: sample.tag.clone(),
        };
        let up = i64::try_from(sample.up).map_err(|_| overflow())?;
        let down = i64::try_from(sample.down).map_err(|_| overflow())?;

        self.store
            .add_inbound_traffic(&sample.tag, up, down)
            .await
            .map_err(|e| match e {
                StoreError::CounterOverflow { .. } => overflow(),
                e if e.is_not_found() => TrafficError::UnknownInboundTag(sample.tag.clone()),
                e => TrafficError::Persistence {
                    tag: sample.tag.clone(),
                    source: e,
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use xui_database::NewInbound;

    use super::*;

    async fn store_with(tags: &[&str]) -> Store {
        let store = Store::open_in_memory().await.unwrap();
        store.bootstrap().await.unwrap();
        for tag in tags {
            store
                .create_inbound(&NewInbound::new(1, *tag))
                .await
                .unwrap();
        }
        store
    }

    async fn counters(store: &Store, tag: &str) -> (i64, i64) {
        let inbound = store.get_inbound_by_tag(tag).await.unwrap();
        (inbound.up, inbound.down)
    }

    #[tokio::test]
    async fn partial_failure_keeps_successful_updates() {
        let store = store_with(&["a"]).await;
        let reconciler = Reconciler::new(store.clone());

        let report = reconciler
            .apply_traffic(&[
                TrafficSample::new("a", 100, 50),
                TrafficSample::new("missing", 1, 1),
            ])
            .await;

        assert_eq!(report.applied, 1);
        assert_eq!(report.failed(), 1);
        assert!(matches!(
            &report.errors[0],
            TrafficError::UnknownInboundTag(tag) if tag == "missing"
        ));
        assert_eq!(counters(&store, "a").await, (100, 50));
    }

    #[tokio::test]
    async fn missing_tag_does_not_block_later_samples() {
        let store = store_with(&["a", "b"]).await;
        let reconciler = Reconciler::new(store.clone());

        let report = reconciler
            .apply_traffic(&[
                TrafficSample::new("missing", 1, 1),
                TrafficSample::new("b", 3, 4),
                TrafficSample::new("a", 1, 2),
            ])
            .await;

        assert_eq!(report.applied, 2);
        assert_eq!(counters(&store, "a").await, (1, 2));
        assert_eq!(counters(&store, "b").await, (3, 4));
    }

    #[tokio::test]
    async fn consecutive_batches_add_up() {
        let store = store_with(&["a"]).await;
        store.add_inbound_traffic("a", 1000, 7).await.unwrap();
        let reconciler = Reconciler::new(store.clone());

        reconciler
            .apply_traffic(&[TrafficSample::new("a", 10, 0)])
            .await;
        reconciler
            .apply_traffic(&[TrafficSample::new("a", 5, 0)])
            .await;

        assert_eq!(counters(&store, "a").await, (1015, 7));
    }

    #[tokio::test]
    async fn oversized_delta_is_rejected() {
        let store = store_with(&["a"]).await;
        let reconciler = Reconciler::new(store.clone());

        let report = reconciler
            .apply_traffic(&[
                TrafficSample::new("a", u64::MAX, 0),
                TrafficSample::new("a", 1, 1),
            ])
            .await;

        assert_eq!(report.applied, 1);
        assert_eq!(report.errors[0].kind(), "overflow");
        assert_eq!(report.errors[0].tag(), "a");
        assert_eq!(counters(&store, "a").await, (1, 1));
    }

    #[tokio::test]
    async fn cumulative_overflow_leaves_counters_intact() {
        let store = store_with(&["a", "b"]).await;
        let reconciler = Reconciler::new(store.clone());

        let report = reconciler
            .apply_traffic(&[TrafficSample::new("a", i64::MAX as u64, 0)])
            .await;
        assert!(report.is_clean());

        let report = reconciler
            .apply_traffic(&[
                TrafficSample::new("a", 1, 0),
                TrafficSample::new("b", 2, 2),
            ])
            .await;

        assert_eq!(report.applied, 1);
        assert!(matches!(
            &report.errors[0],
            TrafficError::Overflow { tag } if tag == "a"
        ));
        assert_eq!(counters(&store, "a").await, (i64::MAX, 0));
        assert_eq!(counters(&store, "b").await, (2, 2));
        assert_eq!(store.list_inbounds().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_batch_is_clean() {
        let store = store_with(&[]).await;
        let report = Reconciler::new(store).apply_traffic(&[]).await;
        assert!(report.is_clean());
        assert_eq!(report.applied, 0);
    }

    #[tokio::test]
    async fn closed_store_reports_persistence_error() {
        let store = store_with(&["a"]).await;
        let reconciler = Reconciler::new(store.clone());
        store.close().await;

        let report = reconciler
            .apply_traffic(&[TrafficSample::new("a", 1, 1)])
            .await;

        assert_eq!(report.applied, 0);
        assert!(matches!(
            report.errors[0],
            TrafficError::Persistence { .. }
        ));
    }
}

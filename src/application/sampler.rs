use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::adapters::SnapshotStore;
use crate::domain::MetricSet;
use crate::ports::InventorySource;

/// Periodic background producer of metric snapshots.
///
/// The single writer of the snapshot store: one tick gathers a metric set
/// and records it, so history ordering follows tick ordering by
/// construction.
pub struct Sampler {
    store: Arc<SnapshotStore>,
    inventory: Option<Arc<dyn InventorySource>>,
    namespace: String,
    interval: Duration,
}

impl Sampler {
    pub fn new(
        store: Arc<SnapshotStore>,
        inventory: Option<Arc<dyn InventorySource>>,
        namespace: String,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            inventory,
            namespace,
            interval,
        }
    }

    /// Run until the shutdown signal flips; the first sample is taken
    /// immediately.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick().await,
                _ = shutdown.changed() => {
                    info!("Sampler stopping");
                    break;
                }
            }
        }
    }

    /// Gather one metric set and record it.
    ///
    /// The baseline values are illustrative, not a monitoring integration;
    /// the inventory-derived count is the only live metric. A provider
    /// failure omits that key rather than substituting a stale value.
    pub async fn tick(&self) {
        let mut metrics = MetricSet::new();

        let unix = Utc::now().timestamp();
        metrics.insert("cpu_usage".to_string(), 45.0 + (unix % 20) as f64);
        metrics.insert("memory_usage".to_string(), 60.0 + (unix % 15) as f64);
        metrics.insert("network_throughput".to_string(), 100.0 + (unix % 50) as f64);

        if let Some(inventory) = &self.inventory {
            match inventory.list_workloads(&self.namespace).await {
                Ok(pods) => {
                    metrics.insert("pod_count".to_string(), pods.len() as f64);
                }
                Err(e) => {
                    warn!("Inventory query failed, omitting pod_count: {}", e);
                }
            }
        }

        debug!("Recording sample with {} metrics", metrics.len());
        self.store.record_sample(metrics);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::{WorkloadDescriptor, WorkloadKind};
    use crate::ports::InventoryError;

    struct FakeInventory {
        pods: usize,
        fail: bool,
    }

    #[async_trait]
    impl InventorySource for FakeInventory {
        async fn list_workloads(
            &self,
            namespace: &str,
        ) -> Result<Vec<WorkloadDescriptor>, InventoryError> {
            if self.fail {
                return Err(InventoryError::Unavailable("connection refused".to_string()));
            }
            Ok((0..self.pods)
                .map(|i| {
                    WorkloadDescriptor::new(
                        format!("uid-{}", i),
                        format!("pod-{}", i),
                        WorkloadKind::Pod,
                        namespace.to_string(),
                    )
                })
                .collect())
        }

        async fn list_deployments(
            &self,
            _namespace: &str,
        ) -> Result<Vec<WorkloadDescriptor>, InventoryError> {
            if self.fail {
                return Err(InventoryError::Unavailable("connection refused".to_string()));
            }
            Ok(Vec::new())
        }
    }

    fn sampler(store: Arc<SnapshotStore>, inventory: Option<Arc<dyn InventorySource>>) -> Sampler {
        Sampler::new(
            store,
            inventory,
            "default".to_string(),
            Duration::from_secs(30),
        )
    }

    #[tokio::test]
    async fn tick_includes_live_pod_count() {
        let store = Arc::new(SnapshotStore::new(10));
        let inventory = Arc::new(FakeInventory {
            pods: 7,
            fail: false,
        });
        sampler(Arc::clone(&store), Some(inventory)).tick().await;

        let current = store.current();
        assert_eq!(current.get("pod_count"), Some(&7.0));
        assert!(current.contains_key("cpu_usage"));
        assert!(current.contains_key("memory_usage"));
        assert!(current.contains_key("network_throughput"));
    }

    #[tokio::test]
    async fn failed_inventory_omits_pod_count() {
        let store = Arc::new(SnapshotStore::new(10));
        let inventory = Arc::new(FakeInventory {
            pods: 0,
            fail: true,
        });
        let sampler = sampler(Arc::clone(&store), Some(inventory));

        sampler.tick().await;
        assert!(!store.current().contains_key("pod_count"));
        assert!(store.current().contains_key("cpu_usage"));

        // The failure does not disturb subsequent ticks.
        sampler.tick().await;
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn tick_without_inventory_records_baselines() {
        let store = Arc::new(SnapshotStore::new(10));
        sampler(Arc::clone(&store), None).tick().await;

        let current = store.current();
        assert_eq!(current.len(), 3);
        assert!(!current.contains_key("pod_count"));
    }

    #[tokio::test(start_paused = true)]
    async fn loop_keeps_cadence_and_stops_on_shutdown() {
        let store = Arc::new(SnapshotStore::new(10));
        let inventory = Arc::new(FakeInventory {
            pods: 0,
            fail: true,
        });
        let sampler = sampler(Arc::clone(&store), Some(inventory));

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(sampler.run(rx));

        // Immediate tick plus three 30s intervals under paused time.
        tokio::time::sleep(Duration::from_secs(95)).await;

        tx.send(true).unwrap();
        handle.await.unwrap();

        assert!(store.len() >= 3);
        assert!(!store.current().contains_key("pod_count"));
    }
}

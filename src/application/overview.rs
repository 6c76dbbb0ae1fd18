use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use serde::Serialize;
use tracing::warn;

use crate::adapters::SnapshotStore;
use crate::domain::{MetricSet, Prediction, RecentAction, WorkloadDescriptor};
use crate::ports::InventorySource;

/// Headline figures for the dashboard's status cards.
///
/// `pods` is None when the inventory provider could not be queried, so the
/// frontend can render "unknown" instead of a misleading zero.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCards {
    pub clusters: u32,
    pub pods: Option<u64>,
    pub monthly_cost: f64,
    pub storage: String,
}

/// The aggregated overview response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewPayload {
    pub status: StatusCards,
    pub recent_actions: Vec<RecentAction>,
    pub predictions: Vec<Prediction>,
    pub current_metrics: MetricSet,
}

/// Synthesizes the overview payload from the snapshot store, a fresh
/// inventory query and static derived fields.
pub struct OverviewService {
    store: Arc<SnapshotStore>,
    inventory: Option<Arc<dyn InventorySource>>,
    namespace: String,
}

impl OverviewService {
    pub fn new(
        store: Arc<SnapshotStore>,
        inventory: Option<Arc<dyn InventorySource>>,
        namespace: String,
    ) -> Self {
        Self {
            store,
            inventory,
            namespace,
        }
    }

    pub fn inventory_connected(&self) -> bool {
        self.inventory.is_some()
    }

    /// Build the overview. Never fails: a provider error degrades the pod
    /// count to unknown while the rest of the payload is served as usual.
    ///
    /// The pod count is a fresh query, independent of the sampler's
    /// last-seen value; small divergence between the two is expected.
    pub async fn build_overview(&self) -> OverviewPayload {
        let pods = self.live_pod_count().await;

        // A single read of the store; not re-read mid-computation.
        let current_metrics = self.store.current();

        OverviewPayload {
            status: StatusCards {
                clusters: 1,
                pods,
                monthly_cost: 234.56,
                storage: "845 GB / 2 TB".to_string(),
            },
            recent_actions: default_recent_actions(),
            predictions: default_predictions(),
            current_metrics,
        }
    }

    /// List pods and deployments as a flat resource inventory. Each listing
    /// degrades independently to empty on provider failure.
    pub async fn infrastructure(&self) -> Vec<WorkloadDescriptor> {
        let mut resources = Vec::new();

        let Some(inventory) = &self.inventory else {
            return resources;
        };

        match inventory.list_workloads(&self.namespace).await {
            Ok(pods) => resources.extend(pods),
            Err(e) => warn!("Pod listing failed: {}", e),
        }

        match inventory.list_deployments(&self.namespace).await {
            Ok(deployments) => resources.extend(deployments),
            Err(e) => warn!("Deployment listing failed: {}", e),
        }

        resources
    }

    async fn live_pod_count(&self) -> Option<u64> {
        let inventory = self.inventory.as_ref()?;
        match inventory.list_workloads(&self.namespace).await {
            Ok(pods) => Some(pods.len() as u64),
            Err(e) => {
                warn!("Inventory query failed, pod count unknown: {}", e);
                None
            }
        }
    }
}

fn default_recent_actions() -> Vec<RecentAction> {
    let now = Utc::now();
    vec![
        RecentAction {
            id: "1".to_string(),
            kind: "scale".to_string(),
            target: "frontend-deployment".to_string(),
            action: "Scaled replicas from 2 to 4".to_string(),
            status: "completed".to_string(),
            timestamp: now - ChronoDuration::minutes(10),
        },
        RecentAction {
            id: "2".to_string(),
            kind: "heal".to_string(),
            target: "backend-pod-xyz".to_string(),
            action: "Restarted unhealthy pod".to_string(),
            status: "completed".to_string(),
            timestamp: now - ChronoDuration::minutes(25),
        },
    ]
}

fn default_predictions() -> Vec<Prediction> {
    vec![
        Prediction {
            id: "1".to_string(),
            kind: "traffic".to_string(),
            message: "Traffic surge expected in 45 minutes".to_string(),
            confidence: 0.89,
            time_window: "45m".to_string(),
        },
        Prediction {
            id: "2".to_string(),
            kind: "cost".to_string(),
            message: "Optimize GPU node usage to save $120/mo".to_string(),
            confidence: 0.95,
            time_window: "monthly".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::{MetricSet, WorkloadKind};
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
                return Err(InventoryError::Unavailable("timed out".to_string()));
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
            namespace: &str,
        ) -> Result<Vec<WorkloadDescriptor>, InventoryError> {
            if self.fail {
                return Err(InventoryError::Unavailable("timed out".to_string()));
            }
            Ok(vec![WorkloadDescriptor::new(
                "dep-1".to_string(),
                "frontend".to_string(),
                WorkloadKind::Deployment,
                namespace.to_string(),
            )])
        }
    }

    fn seeded_store() -> Arc<SnapshotStore> {
        let store = Arc::new(SnapshotStore::new(10));
        let mut metrics = MetricSet::new();
        metrics.insert("cpu_usage".to_string(), 52.0);
        store.record_sample(metrics);
        store
    }

    #[tokio::test]
    async fn overview_includes_live_pod_count() {
        let service = OverviewService::new(
            seeded_store(),
            Some(Arc::new(FakeInventory {
                pods: 5,
                fail: false,
            })),
            "default".to_string(),
        );

        let payload = service.build_overview().await;
        assert_eq!(payload.status.pods, Some(5));
        assert_eq!(payload.current_metrics.get("cpu_usage"), Some(&52.0));
        assert_eq!(payload.predictions.len(), 2);
        assert_eq!(payload.recent_actions.len(), 2);
    }

    #[tokio::test]
    async fn provider_failure_degrades_pod_count_only() {
        let service = OverviewService::new(
            seeded_store(),
            Some(Arc::new(FakeInventory {
                pods: 0,
                fail: true,
            })),
            "default".to_string(),
        );

        let payload = service.build_overview().await;
        assert_eq!(payload.status.pods, None);
        // Everything else is still served.
        assert_eq!(payload.current_metrics.get("cpu_usage"), Some(&52.0));
        assert_eq!(payload.status.clusters, 1);
    }

    #[tokio::test]
    async fn overview_with_empty_store() {
        let service = OverviewService::new(
            Arc::new(SnapshotStore::new(10)),
            None,
            "default".to_string(),
        );

        let payload = service.build_overview().await;
        assert!(payload.current_metrics.is_empty());
        assert_eq!(payload.status.pods, None);
    }

    #[tokio::test]
    async fn infrastructure_merges_pods_and_deployments() {
        let service = OverviewService::new(
            seeded_store(),
            Some(Arc::new(FakeInventory {
                pods: 2,
                fail: false,
            })),
            "default".to_string(),
        );

        let resources = service.infrastructure().await;
        assert_eq!(resources.len(), 3);
        assert!(resources.iter().any(|r| r.kind == WorkloadKind::Deployment));
    }

    #[tokio::test]
    async fn infrastructure_degrades_to_empty() {
        let service = OverviewService::new(
            seeded_store(),
            Some(Arc::new(FakeInventory {
                pods: 0,
                fail: true,
            })),
            "default".to_string(),
        );

        assert!(service.infrastructure().await.is_empty());
    }
}

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::WorkloadDescriptor;

/// Failure of the backing cluster inventory.
///
/// Callers treat every variant the same way: drop the derived field and keep
/// going. The variants exist so the log line says what actually happened.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("cluster unreachable: {0}")]
    Unavailable(String),

    #[error("cluster returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for InventoryError {
    fn from(err: reqwest::Error) -> Self {
        InventoryError::Unavailable(err.to_string())
    }
}

/// Port for querying live cluster workload inventory
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// List pods in a namespace
    async fn list_workloads(
        &self,
        namespace: &str,
    ) -> Result<Vec<WorkloadDescriptor>, InventoryError>;

    /// List deployments in a namespace
    async fn list_deployments(
        &self,
        namespace: &str,
    ) -> Result<Vec<WorkloadDescriptor>, InventoryError>;
}

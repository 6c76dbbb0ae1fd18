use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of cluster workload returned by the inventory provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadKind {
    Pod,
    Deployment,
}

/// Lifecycle phase of a workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl WorkloadPhase {
    pub fn from_k8s(phase: &str) -> Self {
        match phase {
            "Pending" => Self::Pending,
            "Running" => Self::Running,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

/// A single workload as reported by the cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadDescriptor {
    pub id: String,
    pub name: String,
    pub kind: WorkloadKind,
    pub namespace: String,
    pub phase: WorkloadPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
}

impl WorkloadDescriptor {
    pub fn new(id: String, name: String, kind: WorkloadKind, namespace: String) -> Self {
        Self {
            id,
            name,
            kind,
            namespace,
            phase: WorkloadPhase::Unknown,
            created_at: None,
            replicas: None,
        }
    }

    pub fn with_phase(mut self, phase: WorkloadPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_replicas(mut self, replicas: u32) -> Self {
        self.replicas = Some(replicas);
        self
    }
}

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{WorkloadDescriptor, WorkloadKind, WorkloadPhase};
use crate::ports::{InventoryError, InventorySource};

/// Kubernetes API adapter using the cluster REST endpoints directly.
///
/// Auth is a bearer token (service account or user token); the request
/// timeout is finite so a hung apiserver can never stall the sampler's next
/// tick.
pub struct KubeAdapter {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct ObjectList<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ObjectMeta {
    #[serde(default)]
    uid: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    namespace: String,
    #[serde(rename = "creationTimestamp")]
    creation_timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct PodItem {
    metadata: ObjectMeta,
    #[serde(default)]
    status: PodStatus,
}

#[derive(Debug, Default, Deserialize)]
struct PodStatus {
    phase: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeploymentItem {
    metadata: ObjectMeta,
    #[serde(default)]
    spec: DeploymentSpec,
}

#[derive(Debug, Default, Deserialize)]
struct DeploymentSpec {
    replicas: Option<u32>,
}

impl KubeAdapter {
    pub fn new(
        api_url: String,
        token: Option<String>,
        timeout: Duration,
        insecure_tls: bool,
    ) -> Result<Self, InventoryError> {
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(insecure_tls);

        if let Some(token) = token {
            let mut headers = reqwest::header::HeaderMap::new();
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| InventoryError::Unavailable(format!("invalid token: {}", e)))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let client = builder.build()?;
        Ok(Self { client, api_url })
    }

    async fn get_list<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, InventoryError> {
        let url = format!("{}{}", self.api_url, path);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InventoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let list: ObjectList<T> = response.json().await?;
        Ok(list.items)
    }
}

#[async_trait]
impl InventorySource for KubeAdapter {
    async fn list_workloads(
        &self,
        namespace: &str,
    ) -> Result<Vec<WorkloadDescriptor>, InventoryError> {
        let pods: Vec<PodItem> = self
            .get_list(&format!("/api/v1/namespaces/{}/pods", namespace))
            .await?;

        Ok(pods
            .into_iter()
            .map(|pod| {
                let phase = pod
                    .status
                    .phase
                    .as_deref()
                    .map(WorkloadPhase::from_k8s)
                    .unwrap_or(WorkloadPhase::Unknown);
                let mut descriptor = WorkloadDescriptor::new(
                    pod.metadata.uid,
                    pod.metadata.name,
                    WorkloadKind::Pod,
                    pod.metadata.namespace,
                )
                .with_phase(phase);
                if let Some(created) = pod.metadata.creation_timestamp {
                    descriptor = descriptor.with_created_at(created);
                }
                descriptor
            })
            .collect())
    }

    async fn list_deployments(
        &self,
        namespace: &str,
    ) -> Result<Vec<WorkloadDescriptor>, InventoryError> {
        let deployments: Vec<DeploymentItem> = self
            .get_list(&format!("/apis/apps/v1/namespaces/{}/deployments", namespace))
            .await?;

        Ok(deployments
            .into_iter()
            .map(|dep| {
                let mut descriptor = WorkloadDescriptor::new(
                    dep.metadata.uid,
                    dep.metadata.name,
                    WorkloadKind::Deployment,
                    dep.metadata.namespace,
                )
                .with_phase(WorkloadPhase::Running);
                if let Some(created) = dep.metadata.creation_timestamp {
                    descriptor = descriptor.with_created_at(created);
                }
                if let Some(replicas) = dep.spec.replicas {
                    descriptor = descriptor.with_replicas(replicas);
                }
                descriptor
            })
            .collect())
    }
}

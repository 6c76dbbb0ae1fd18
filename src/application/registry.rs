use std::sync::RwLock;

use chrono::{Duration as ChronoDuration, Utc};
use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::domain::{ActivityEntry, Recommendation, RecommendationStatus};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("recommendation not found: {0}")]
    NotFound(String),
}

/// In-memory registry of recommendations.
///
/// Status transitions only move a recommendation out of `Pending`; applied
/// and rejected are terminal, so a repeated apply (or a reject after an
/// apply) reports NotFound rather than silently rewriting history.
pub struct RecommendationRegistry {
    inner: RwLock<Vec<Recommendation>>,
}

impl RecommendationRegistry {
    pub fn new(recommendations: Vec<Recommendation>) -> Self {
        Self {
            inner: RwLock::new(recommendations),
        }
    }

    /// Registry pre-populated with the stock advisory items
    pub fn seeded() -> Self {
        let now = Utc::now();
        Self::new(vec![
            Recommendation {
                id: "1".to_string(),
                kind: "scale".to_string(),
                target: "frontend-deployment".to_string(),
                action: "Scale replicas from 2 to 4".to_string(),
                confidence: 0.93,
                reasoning: "Traffic pattern indicates 70% increase in next 30 minutes"
                    .to_string(),
                impact: "Improved response times, $12/day cost increase".to_string(),
                status: RecommendationStatus::Pending,
                created_at: now - ChronoDuration::minutes(5),
            },
            Recommendation {
                id: "2".to_string(),
                kind: "optimize".to_string(),
                target: "gpu-node-pool".to_string(),
                action: "Switch to spot instances".to_string(),
                confidence: 0.87,
                reasoning: "Workload is fault-tolerant, can save 60% on compute".to_string(),
                impact: "Save $120/month, possible interruptions".to_string(),
                status: RecommendationStatus::Pending,
                created_at: now - ChronoDuration::minutes(15),
            },
            Recommendation {
                id: "3".to_string(),
                kind: "security".to_string(),
                target: "api-gateway".to_string(),
                action: "Enable rate limiting".to_string(),
                confidence: 0.95,
                reasoning: "Detected unusual traffic patterns from 3 IPs".to_string(),
                impact: "Prevent potential DDoS, no cost impact".to_string(),
                status: RecommendationStatus::Pending,
                created_at: now - ChronoDuration::minutes(30),
            },
        ])
    }

    pub fn list(&self) -> Vec<Recommendation> {
        self.inner.read().unwrap().clone()
    }

    pub fn apply(&self, id: &str) -> Result<Recommendation, RegistryError> {
        self.transition(id, RecommendationStatus::Applied)
    }

    pub fn reject(&self, id: &str) -> Result<Recommendation, RegistryError> {
        self.transition(id, RecommendationStatus::Rejected)
    }

    fn transition(
        &self,
        id: &str,
        status: RecommendationStatus,
    ) -> Result<Recommendation, RegistryError> {
        let mut recommendations = self.inner.write().unwrap();
        let Some(rec) = recommendations
            .iter_mut()
            .find(|r| r.id == id && r.status == RecommendationStatus::Pending)
        else {
            return Err(RegistryError::NotFound(id.to_string()));
        };

        rec.status = status;
        info!("Recommendation {} -> {:?}", rec.id, rec.status);
        Ok(rec.clone())
    }
}

/// Read-only audit log of recent automated and manual actions
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new(entries: Vec<ActivityEntry>) -> Self {
        Self { entries }
    }

    pub fn seeded() -> Self {
        let now = Utc::now();
        Self::new(vec![
            ActivityEntry {
                id: "1".to_string(),
                kind: "scale".to_string(),
                action: "Scale deployment".to_string(),
                target: "frontend-deployment".to_string(),
                status: "completed".to_string(),
                user: "AI System".to_string(),
                timestamp: now - ChronoDuration::minutes(10),
                details: json!({
                    "from": 2,
                    "to": 4,
                    "reason": "Predicted traffic increase",
                    "duration": "2.3s",
                }),
            },
            ActivityEntry {
                id: "2".to_string(),
                kind: "heal".to_string(),
                action: "Restart pod".to_string(),
                target: "backend-pod-xyz".to_string(),
                status: "completed".to_string(),
                user: "AI System".to_string(),
                timestamp: now - ChronoDuration::minutes(25),
                details: json!({
                    "reason": "Health check failed",
                    "duration": "8.1s",
                }),
            },
            ActivityEntry {
                id: "3".to_string(),
                kind: "create".to_string(),
                action: "Create Redis cluster".to_string(),
                target: "redis-cache".to_string(),
                status: "completed".to_string(),
                user: "admin@example.com".to_string(),
                timestamp: now - ChronoDuration::hours(1),
                details: json!({
                    "nodes": 2,
                    "region": "us-east-1",
                    "type": "cache.t3.micro",
                    "duration": "45.2s",
                }),
            },
            ActivityEntry {
                id: "4".to_string(),
                kind: "optimize".to_string(),
                action: "Enable caching".to_string(),
                target: "api-gateway".to_string(),
                status: "completed".to_string(),
                user: "AI System".to_string(),
                timestamp: now - ChronoDuration::hours(2),
                details: json!({
                    "cacheSize": "1GB",
                    "ttl": "5m",
                    "hitRate": "0%",
                }),
            },
        ])
    }

    /// Entries matching the given type and status filters, newest-seeded
    /// order preserved
    pub fn entries(&self, kind: Option<&str>, status: Option<&str>) -> Vec<ActivityEntry> {
        self.entries
            .iter()
            .filter(|e| kind.is_none_or(|k| e.kind == k))
            .filter(|e| status.is_none_or(|s| e.status == s))
            .cloned()
            .collect()
    }
}

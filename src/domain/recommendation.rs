use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of an operator recommendation.
///
/// `Pending` is the only state transitions are allowed from; `Applied` and
/// `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStatus {
    Pending,
    Applied,
    Rejected,
}

impl RecommendationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Applied | Self::Rejected)
    }
}

/// An actionable recommendation surfaced on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target: String,
    pub action: String,
    pub confidence: f64,
    pub reasoning: String,
    pub impact: String,
    pub status: RecommendationStatus,
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the audit/activity log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub action: String,
    pub target: String,
    pub status: String,
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
}

/// A predicted upcoming event shown on the overview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub confidence: f64,
    pub time_window: String,
}

/// A recently completed automated action shown on the overview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target: String,
    pub action: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

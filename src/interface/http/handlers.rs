use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::adapters::SnapshotStore;
use crate::application::{ActivityLog, OverviewService, RecommendationRegistry};
use crate::domain::{ActivityEntry, MetricSet, MetricSnapshot, Recommendation, WorkloadDescriptor};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
    pub overview: Arc<OverviewService>,
    pub recommendations: Arc<RecommendationRegistry>,
    pub activity: Arc<ActivityLog>,
    pub chat: Arc<ChatProxy>,
}

/// Response for /api/v1/metrics
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub timestamp: String,
    pub metrics: MetricSet,
}

/// Response for /api/v1/metrics/history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<MetricSnapshot>,
}

/// Response for /api/v1/recommendations
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

/// Response for /api/v1/infrastructure
#[derive(Debug, Serialize)]
pub struct InfrastructureResponse {
    pub resources: Vec<WorkloadDescriptor>,
}

/// Response for /api/v1/logs
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub logs: Vec<ActivityEntry>,
    pub total: usize,
}

/// Query params for /api/v1/logs
#[derive(Debug, Deserialize)]
pub struct LogQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
}

/// Handler for GET /health
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "opsdeck"
        })),
    )
}

/// Handler for GET /api/v1/overview
pub async fn overview_handler(State(state): State<AppState>) -> Response {
    let payload = state.overview.build_overview().await;
    (StatusCode::OK, Json(payload)).into_response()
}

/// Handler for GET /api/v1/status
pub async fn status_handler(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "healthy": true,
            "clusterConnected": state.overview.inventory_connected(),
            "timestamp": Utc::now(),
        })),
    )
        .into_response()
}

/// Handler for GET /api/v1/metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        Json(MetricsResponse {
            timestamp: Utc::now().to_rfc3339(),
            metrics: state.store.current(),
        }),
    )
        .into_response()
}

/// Handler for GET /api/v1/metrics/history
pub async fn history_handler(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        Json(HistoryResponse {
            history: state.store.history(),
        }),
    )
        .into_response()
}

/// Handler for GET /api/v1/recommendations
pub async fn recommendations_handler(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        Json(RecommendationsResponse {
            recommendations: state.recommendations.list(),
        }),
    )
        .into_response()
}

/// Handler for POST /api/v1/recommendations/{id}/apply
pub async fn apply_recommendation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.recommendations.apply(&id) {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "message": "Recommendation applied successfully"
            })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Handler for POST /api/v1/recommendations/{id}/reject
pub async fn reject_recommendation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.recommendations.reject(&id) {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "message": "Recommendation rejected"
            })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Handler for GET /api/v1/infrastructure
pub async fn infrastructure_handler(State(state): State<AppState>) -> Response {
    let resources = state.overview.infrastructure().await;
    (StatusCode::OK, Json(InfrastructureResponse { resources })).into_response()
}

/// Handler for GET /api/v1/logs
pub async fn logs_handler(
    State(state): State<AppState>,
    Query(params): Query<LogQuery>,
) -> Response {
    let logs = state
        .activity
        .entries(params.kind.as_deref(), params.status.as_deref());
    let total = logs.len();
    (StatusCode::OK, Json(LogsResponse { logs, total })).into_response()
}

/// Chat request forwarded to the ops assistant engine
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Forwards chat messages to the assistant engine, with a canned fallback
/// when the engine is down so the dashboard chat stays responsive.
pub struct ChatProxy {
    client: reqwest::Client,
    engine_url: String,
}

impl ChatProxy {
    pub fn new(client: reqwest::Client, engine_url: String) -> Self {
        Self { client, engine_url }
    }

    pub async fn send(&self, request: &ChatRequest) -> ChatResponse {
        let url = format!("{}/api/chat", self.engine_url);
        let result = self.client.post(&url).json(request).send().await;

        match result {
            Ok(response) => match response.json::<ChatResponse>().await {
                Ok(chat) => chat,
                Err(e) => {
                    warn!("Assistant engine returned malformed response: {}", e);
                    Self::fallback()
                }
            },
            Err(e) => {
                warn!("Assistant engine unreachable: {}", e);
                Self::fallback()
            }
        }
    }

    fn fallback() -> ChatResponse {
        ChatResponse {
            response: "I can help you manage your infrastructure. Try asking:\n\
                       - 'Create a Redis cluster with 2 nodes'\n\
                       - 'Scale the frontend deployment to 5 replicas'\n\
                       - 'Show me current costs'"
                .to_string(),
            code: None,
            language: None,
        }
    }
}

/// Handler for POST /api/v1/chat
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let response = state.chat.send(&request).await;
    (StatusCode::OK, Json(response)).into_response()
}

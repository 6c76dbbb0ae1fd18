use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers::{
    apply_recommendation_handler, chat_handler, health_handler, history_handler,
    infrastructure_handler, logs_handler, metrics_handler, overview_handler,
    recommendations_handler, reject_recommendation_handler, status_handler, AppState,
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/overview", get(overview_handler))
        .route("/api/v1/status", get(status_handler))
        .route("/api/v1/metrics", get(metrics_handler))
        .route("/api/v1/metrics/history", get(history_handler))
        .route("/api/v1/recommendations", get(recommendations_handler))
        .route(
            "/api/v1/recommendations/{id}/apply",
            post(apply_recommendation_handler),
        )
        .route(
            "/api/v1/recommendations/{id}/reject",
            post(reject_recommendation_handler),
        )
        .route("/api/v1/infrastructure", get(infrastructure_handler))
        .route("/api/v1/logs", get(logs_handler))
        .route("/api/v1/chat", post(chat_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

use axum::{extract::State, routing::get, Json, Router};

use crate::models::{AppState, HealthResponse};

pub const GREETING: &str = "Hello World! Server";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .with_state(state)
}

async fn root() -> &'static str {
    GREETING
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        records: state.datasets.len().await,
    };

    Json(response)
}

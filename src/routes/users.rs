use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::dataset::search;
use crate::models::{AppState, SearchResponse};
use crate::types::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(search_users))
        .with_state(state)
}

/// GET /api/users?q= - Records with any field containing `q`, ignoring case
async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or(AppError::MissingQuery)?;

    let snapshot = state.datasets.snapshot().await;
    let data = search(&snapshot, &query);
    debug!(query = %query, matches = data.len(), total = snapshot.len(), "Search served");

    Ok(Json(SearchResponse { data }))
}

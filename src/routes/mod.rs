//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/` - Plain text greeting
//! - `/api/files` - CSV upload, replaces the dataset
//! - `/api/users` - Substring search over the dataset
//! - `/api/health` - Health checks

pub mod files;
pub mod health;
pub mod users;

use axum::Router;
use tracing::info;

use crate::middleware::{apply_cors, apply_tracing};
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let origins = state.config.server.cors_allowed_origins.clone();

    let router = Router::new()
        .merge(health::router(state.clone()))
        .merge(files::router(state.clone()))
        .merge(users::router(state));

    apply_tracing(apply_cors(router, &origins))
}

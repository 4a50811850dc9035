// CSV Search - upload a CSV file, search its rows over HTTP

pub mod config;
pub mod dataset;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use dataset::{DatasetStore, Record};
pub use models::AppState;
pub use types::{AppError, AppResult};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}

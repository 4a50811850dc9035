use crate::config::Config;
use crate::dataset::{DatasetStore, Record};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub datasets: DatasetStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            datasets: DatasetStore::new(),
        }
    }
}

// Response bodies

#[derive(Debug, Clone, serde::Serialize)]
pub struct UploadResponse {
    pub data: Vec<Record>,
    pub message: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchResponse {
    pub data: Vec<Record>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub records: usize,
}

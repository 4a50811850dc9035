use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::{debug, info};

use crate::dataset::parse_csv;
use crate::models::{AppState, UploadResponse};
use crate::types::{AppError, AppResult};

/// Multipart field carrying the CSV attachment.
pub const FILE_FIELD: &str = "file";

pub fn router(state: AppState) -> Router {
    let limit = state.config.upload.max_body_bytes;
    Router::new()
        .route("/api/files", post(upload_file))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

/// POST /api/files - Replace the dataset with the rows of an uploaded CSV
async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    info!("File upload request received");

    // A request that is not multipart at all carries no file.
    let mut multipart = multipart.map_err(|rejection| {
        debug!("Upload is not a multipart body: {}", rejection);
        AppError::MissingFile
    })?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) || field.file_name().is_none() {
            continue;
        }
        let content_type = field.content_type().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);
        let bytes = field.bytes().await?;
        upload = Some((file_name, content_type, bytes));
        break;
    }

    let (file_name, content_type, bytes) = upload.ok_or(AppError::MissingFile)?;

    if content_type.as_deref() != Some(mime::TEXT_CSV.as_ref()) {
        debug!(?file_name, ?content_type, "Upload is not declared as CSV");
        return Err(AppError::UnsupportedMediaType);
    }

    let records = parse_csv(&bytes)?;
    state.datasets.replace(records.clone()).await;

    info!(
        file = file_name.as_deref().unwrap_or_default(),
        records = records.len(),
        "Dataset replaced from upload"
    );

    Ok(Json(UploadResponse {
        data: records,
        message: "File uploaded successfully.".to_string(),
    }))
}

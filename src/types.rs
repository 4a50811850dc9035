// Error taxonomy shared by the route handlers

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::dataset::ParseError;
use crate::models::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Returns `400 Bad Request`
    #[error("File is required.")]
    MissingFile,

    /// Returns `415 Unsupported Media Type`
    #[error("File must be CSV.")]
    UnsupportedMediaType,

    /// Returns `500 Internal Server Error`
    #[error("Error parsing the file.")]
    Parse(#[from] ParseError),

    /// Returns `400 Bad Request`
    #[error("Query param 'q' is required.")]
    MissingQuery,

    /// Returns the status carried by the multipart error, usually `400 Bad Request`
    /// or `413 Payload Too Large`
    #[error("Invalid multipart request.")]
    Multipart(#[from] MultipartError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::MissingQuery => StatusCode::BAD_REQUEST,
            Self::Multipart(err) => err.status(),
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Parse(source) => error!("Rejecting upload: {}", source),
            Self::Multipart(source) => warn!("Rejecting request: {}", source),
            other => warn!("Rejecting request: {}", other),
        }

        let body = ErrorResponse {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

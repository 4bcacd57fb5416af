use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Upload is not valid UTF-8 text: {0}")]
    InvalidCsv(String),

    #[error("Invalid year/month: {0}")]
    InvalidMonth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidCsv(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidMonth(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            ApiError::Json(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

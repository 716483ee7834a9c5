// Error types for the HTTP layer

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::repository::RepoError;

/// HTTP-facing error responses.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": {
                "status": status.as_u16(),
                "message": error_message,
            }
        }));

        (status, body).into_response()
    }
}

// Map core repository errors to appropriate HTTP status codes. The core
// never sees status codes; this is the only place the mapping lives.
impl From<RepoError> for ApiError {
    fn from(error: RepoError) -> Self {
        match error {
            RepoError::InvalidInput(msg) => Self::BadRequest(msg),
            RepoError::NotFound(name) => Self::NotFound(format!("'{}' was not found", name)),
            RepoError::MissingFiles(names) => {
                Self::NotFound(format!("Files do not exist: {}", names.join(", ")))
            }
            RepoError::Storage(msg) | RepoError::Derivative(msg) | RepoError::Index(msg) => {
                Self::InternalServerError(msg)
            }
        }
    }
}

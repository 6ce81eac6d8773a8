//! API error type for cafe-api
//!
//! Every handler failure is converted into a JSON body of the shape
//! `{"error": {<kind>: <message>}}` with a matching status code. Storage
//! faults are logged here and surfaced as a generic 500 with no driver
//! detail leaked to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Handler-level error, rendered as structured JSON
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown id or empty search result (404)
    #[error("{0}")]
    NotFound(String),
    /// Bad delete credential (403)
    #[error("{0}")]
    Forbidden(String),
    /// Missing or malformed required field (400)
    #[error("{0}")]
    BadRequest(String),
    /// Duplicate unique field (409)
    #[error("{0}")]
    Conflict(String),
    /// Unexpected storage fault (500)
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, "Forbidden", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", msg),
            Self::Database(err) => {
                tracing::error!(error = %err, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "Something went wrong on our end.".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": { kind: message } }))).into_response()
    }
}

/// Convenience alias for JSON handler results
pub type ApiResult<T> = Result<Json<T>, ApiError>;

//! Server error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request body or field.
    #[error("{0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Storage failure while serving a request.
    #[error("Storage error: {0}")]
    Store(#[from] task_store::TaskStoreError),
}

impl ServerError {
    /// Creates an invalid request error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }

    /// The not found error returned for unknown task ids.
    pub fn task_not_found() -> Self {
        Self::NotFound("Task not found".to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Store(e) => {
                tracing::error!(error = %e, "Task store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

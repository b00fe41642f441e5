//! API error types.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{debug, error};

use dispatchq_queue::QueueError;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Queue operation failed.
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// Request body could not be decoded.
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// Unexpected fault inside a handler.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Queue(QueueError::MissingField(_))
            | ApiError::Queue(QueueError::InvalidCategory(_))
            | ApiError::Queue(QueueError::InvalidSort(_))
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Queue(QueueError::QueueEmpty)
            | ApiError::Queue(QueueError::DeliveryNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

//! API error boundary.
//!
//! Three classes, mapped to HTTP statuses: malformed input is the
//! caller's fault (400), collaborator failures are a bad gateway (502),
//! and everything unexpected is a generic 500 whose detail is logged but
//! never leaked to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;
use voxrag_model::ModelError;
use voxrag_retrieval::RagError;

/// Error type returned by all handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed input: surfaced with a client-error status, never retried.
    #[error("validation error: {0}")]
    Validation(String),

    /// An embedding or generator collaborator failed.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Unexpected internal fault. Logged with full context at the
    /// boundary; the client sees a generic message.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Validation(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Upstream(detail) => {
                error!(detail, "upstream collaborator failure");
                (StatusCode::BAD_GATEWAY, detail)
            }
            ApiError::Internal(err) => {
                error!(error = ?err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<RagError> for ApiError {
    fn from(err: RagError) -> Self {
        match err {
            RagError::Embedding { .. } => ApiError::Upstream(err.to_string()),
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Config(_) => ApiError::Internal(err.into()),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

//! Error types for musiclib-api
//!
//! Every failure is answered with a JSON body
//! `{"error": {"code": .., "message": ..}}`. Messages are short and never
//! include storage or upstream internals; those are logged instead.

use crate::enrichment::CreateError;
use crate::pagination::PageError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad or missing caller input (400)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No such song, or nothing to serve (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Song-info service could not be reached (500)
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Song-info service answered with a failure status (500)
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// Song-info service answered with an unreadable body (500)
    #[error("Upstream bad response: {0}")]
    UpstreamBadResponse(String),

    /// Song-info service left required attributes empty (500)
    #[error("Upstream incomplete: {0}")]
    UpstreamIncomplete(String),

    /// Persistence failure (500)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Request exceeded the server-side time limit (408)
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Unexpected middleware failure (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::UpstreamUnavailable(_)
            | ApiError::UpstreamError(_)
            | ApiError::UpstreamBadResponse(_)
            | ApiError::UpstreamIncomplete(_)
            | ApiError::Storage(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            ApiError::UpstreamError(_) => "UPSTREAM_ERROR",
            ApiError::UpstreamBadResponse(_) => "UPSTREAM_BAD_RESPONSE",
            ApiError::UpstreamIncomplete(_) => "UPSTREAM_INCOMPLETE",
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Timeout(_) => "TIMEOUT",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::InvalidArgument(msg)
            | ApiError::NotFound(msg)
            | ApiError::UpstreamUnavailable(msg)
            | ApiError::UpstreamError(msg)
            | ApiError::UpstreamBadResponse(msg)
            | ApiError::UpstreamIncomplete(msg)
            | ApiError::Storage(msg)
            | ApiError::Timeout(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.message(),
            }
        }));

        (self.status(), body).into_response()
    }
}

impl From<musiclib_common::Error> for ApiError {
    fn from(err: musiclib_common::Error) -> Self {
        match err {
            musiclib_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            musiclib_common::Error::InvalidInput(msg) => ApiError::InvalidArgument(msg),
            other => {
                error!(error = %other, "Storage operation failed");
                ApiError::Storage("Storage operation failed".to_string())
            }
        }
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        let msg = match err {
            PageError::InvalidLimit(_) => "Invalid limit value",
            PageError::InvalidOffset(_) => "Invalid offset value",
            PageError::OffsetOutOfRange { .. } => "Offset is out of range",
        };
        ApiError::InvalidArgument(msg.to_string())
    }
}

impl From<CreateError> for ApiError {
    fn from(err: CreateError) -> Self {
        // Details were already logged by the workflow
        match err {
            CreateError::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
            CreateError::UpstreamRejected => {
                ApiError::InvalidArgument("Invalid song or group name".to_string())
            }
            CreateError::UpstreamUnavailable(_) => {
                ApiError::UpstreamUnavailable("Failed to fetch song details".to_string())
            }
            CreateError::UpstreamError(_) => {
                ApiError::UpstreamError("Failed to fetch song details".to_string())
            }
            CreateError::UpstreamBadResponse(_) => {
                ApiError::UpstreamBadResponse("Failed to parse song details".to_string())
            }
            CreateError::UpstreamIncomplete(_) => {
                ApiError::UpstreamIncomplete("Incomplete song details received".to_string())
            }
            CreateError::Storage(_) => ApiError::Storage("Failed to create song".to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(error = %rejection, "Rejected query string");
        ApiError::InvalidArgument("Invalid query parameters".to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "Rejected request body");
        ApiError::InvalidArgument("Invalid request body".to_string())
    }
}

/// Error handler for the timeout middleware
pub async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("Request timed out");
        ApiError::Timeout("Request timed out".to_string())
    } else {
        error!(error = %err, "Middleware failure");
        ApiError::Internal("Internal server error".to_string())
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

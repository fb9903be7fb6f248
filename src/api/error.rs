//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use crate::checkin::CheckInError;
use crate::cycle::CycleError;
use crate::store::StoreError;
use crate::tools::ToolError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad date or cycle length
    #[error("{0}")]
    Cycle(#[from] CycleError),

    /// Memory store rejected the record
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Tool(#[from] ToolError),

    #[error("{0}")]
    CheckIn(#[from] CheckInError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Status code and machine-readable error code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Cycle(_) => (StatusCode::BAD_REQUEST, "INVALID_CYCLE_INPUT"),
            ApiError::Store(_) => (StatusCode::BAD_REQUEST, "STORE_ERROR"),
            ApiError::Tool(ToolError::UnknownTool(_)) => (StatusCode::NOT_FOUND, "UNKNOWN_TOOL"),
            ApiError::Tool(ToolError::InvalidArguments { .. }) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENTS")
            }
            ApiError::Tool(ToolError::Serialization(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            ApiError::CheckIn(CheckInError::NoCycleInfo(_)) => {
                (StatusCode::NOT_FOUND, "NO_CYCLE_INFO")
            }
            ApiError::CheckIn(CheckInError::MissingMood) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            ApiError::CheckIn(CheckInError::Cycle(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_CYCLE_INPUT")
            }
            ApiError::CheckIn(CheckInError::Store(_)) => (StatusCode::BAD_REQUEST, "STORE_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                ApiError::Cycle(CycleError::InvalidCycleLength(0)),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Tool(ToolError::UnknownTool("x".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::CheckIn(CheckInError::NoCycleInfo("u".into())),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::Store(StoreError::EmptyUserId), StatusCode::BAD_REQUEST),
            (
                ApiError::CheckIn(CheckInError::Store(StoreError::InvalidCycleLength(0))),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_and_code().0, status, "{error}");
        }
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::Store(StoreError::EmptyUserId).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

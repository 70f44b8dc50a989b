//! API response types
//!
//! Successful responses carry the resource itself (a record, an array of
//! records, or an export payload). Failures share one envelope:
//!
//! ```json
//! { "success": false, "error": { "code": "NOT_FOUND", "message": "Location not found" } }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Machine-readable error codes
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const UNSUPPORTED_FORMAT: &str = "UNSUPPORTED_FORMAT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Standard error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    /// Pair the body with an HTTP status
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }

    /// 500 with a generic message; the cause is logged, never returned
    pub fn internal(cause: &dyn std::fmt::Display) -> Response {
        tracing::error!(error = %cause, "Request failed with an internal error");
        Self::new(codes::INTERNAL_ERROR, "An internal error occurred")
            .with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

//! API error type and error codes
//!
//! - `ApiError`: handler error, rendered as `ErrorResponse`
//! - `error_codes`: standard error code constants

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::orders::StoreError;

use super::order::OrderValidationError;

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const UNSUPPORTED_MEDIA_TYPE: i32 = 1002;

    // Resource errors (4xxx)
    pub const ORDER_NOT_FOUND: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;

    /// Error name string for a code
    pub fn name(code: i32) -> &'static str {
        match code {
            INVALID_PARAMETER => "INVALID_PARAMETER",
            UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
            ORDER_NOT_FOUND => "ORDER_NOT_FOUND",
            SERVICE_UNAVAILABLE => "SERVICE_UNAVAILABLE",
            _ => "INTERNAL_ERROR",
        }
    }
}

// ============================================================================
// ErrorResponse
// ============================================================================

/// JSON body for every non-2xx response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = 1001)]
    pub code: i32,
    #[schema(example = "INVALID_PARAMETER")]
    pub error: String,
    #[schema(example = "Missing required field 'customer'")]
    pub message: String,
    /// Offending request field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "customer")]
    pub field: Option<String>,
}

// ============================================================================
// ApiError
// ============================================================================

/// Handler error with HTTP status
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub message: String,
    pub field: Option<String>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, code: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            message,
        )
    }

    /// 400 naming the offending field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::bad_request(message)
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            error_codes::ORDER_NOT_FOUND,
            message,
        )
    }

    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            error_codes::UNSUPPORTED_MEDIA_TYPE,
            message,
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            message,
        )
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            message,
        )
    }

    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl From<OrderValidationError> for ApiError {
    fn from(err: OrderValidationError) -> Self {
        Self::invalid_field(err.field(), err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Detail stays in the log
        tracing::error!(error = %err, "Order store failure");
        Self::internal("Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            code: self.code,
            error: error_codes::name(self.code).to_string(),
            message: self.message,
            field: self.field,
        };
        (self.status, Json(body)).into_response()
    }
}

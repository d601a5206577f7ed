//! # API Error Types
//!
//! Every failure a handler can hit ends up as an [`ApiError`], which renders
//! as `{"error": "<message>"}` with the matching status code.
//!
//! ## Mapping
//! ```text
//! ┌──────────────────────────────────────┬────────┬────────────────────────────────────────┐
//! │ Source                               │ Status │ Message                                │
//! ├──────────────────────────────────────┼────────┼────────────────────────────────────────┤
//! │ ValidationError / malformed JSON     │ 400    │ the validation message                 │
//! │ DbError::UniqueViolation(products.sku)│ 409   │ SKU must be unique                     │
//! │ DbError::ForeignKeyViolation         │ 409    │ Unknown warehouse or supplier reference│
//! │ CoreError::ProductNotFound           │ 404    │ Product not found: <id>                │
//! │ BytesRejection (over body limit)     │ 413    │ Request body too large                 │
//! │ anything else                        │ 500    │ Internal error (cause is logged)       │
//! └──────────────────────────────────────┴────────┴────────────────────────────────────────┘
//! ```

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use stockroom_core::{CoreError, ValidationError};
use stockroom_db::DbError;

/// Message returned for any failure whose cause must not reach the client.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

/// Error categories, each with a fixed HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    Conflict,
    PayloadTooLarge,
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An error ready to be sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Logs `cause` and returns the generic 500.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "Request failed with internal error");
        Self::new(ErrorCode::Internal, INTERNAL_ERROR_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::new(ErrorCode::PayloadTooLarge, "Request body too large")
        } else {
            ApiError::bad_request(rejection.body_text())
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(inner) => inner.into(),
            CoreError::ProductNotFound(_) => ApiError::not_found(err.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        if err.is_unique_violation_on("products.sku") {
            return ApiError::new(ErrorCode::Conflict, "SKU must be unique");
        }

        match err {
            DbError::ForeignKeyViolation { .. } => {
                ApiError::new(ErrorCode::Conflict, "Unknown warehouse or supplier reference")
            }
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            other => ApiError::internal(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_sku_is_conflict() {
        let err: ApiError = DbError::UniqueViolation {
            field: "products.sku".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.message, "SKU must be unique");
    }

    #[test]
    fn test_other_unique_violation_is_internal() {
        let err: ApiError = DbError::UniqueViolation {
            field: "inventory.product_id, inventory.warehouse_id".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_foreign_key_is_conflict() {
        let err: ApiError = DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.message, "Unknown warehouse or supplier reference");
    }

    #[test]
    fn test_internal_cause_is_not_leaked() {
        let err: ApiError = DbError::QueryFailed("disk I/O error at page 7".to_string()).into();
        assert_eq!(err.message, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err: ApiError = CoreError::from(ValidationError::required("price")).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "price is required");
    }

    #[test]
    fn test_product_not_found() {
        let err: ApiError = CoreError::ProductNotFound("abc".to_string()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Product not found: abc");
    }
}

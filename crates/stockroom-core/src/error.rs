//! # Domain Errors
//!
//! [`ValidationError`] messages go to API clients unchanged, so each one
//! names the offending field (`"price is required"`, `"Invalid price format"`).
//!
//! ```text
//!   ValidationError ─┐
//!                    ├─► CoreError ─► ApiError (400 / 404)
//!   ProductNotFound ─┘
//!
//!   DbError (stockroom-db) ────────► ApiError (409 / 400 / 500)
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements and are
/// always reported back to the caller as a 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The request body is not a JSON object.
    #[error("Request body must be a JSON object")]
    NotAnObject,

    /// A required field is missing, null or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (wrong JSON type, bad characters, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Price is not an exact decimal with at most two fractional digits.
    #[error("Invalid price format")]
    InvalidPriceFormat { input: String },

    /// Collection has more entries than allowed.
    #[error("{field} must have at most {max} entries")]
    TooMany { field: String, max: usize },

    /// Duplicate value within a single request.
    #[error("{field} '{value}' is listed more than once")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_names_the_field() {
        let err = ValidationError::required("initial_quantity");
        assert_eq!(err.to_string(), "initial_quantity is required");
    }

    #[test]
    fn test_price_format_message_hides_input() {
        let err = ValidationError::InvalidPriceFormat {
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid price format");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("sku").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: sku is required");
    }
}

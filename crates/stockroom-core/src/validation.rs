//! # Field Rules
//!
//! Per-field checks applied after [`crate::intake`] has pulled typed values
//! out of the request body.
//!
//! ```text
//!   body bytes ──► serde_json ──► intake::NewProduct::from_json
//!                                        │
//!                                        ├── validate_product_name
//!                                        ├── validate_sku
//!                                        ├── validate_price
//!                                        └── validate_stock_quantity (each row)
//!                                        │
//!                                        ▼
//!                          SQLite: UNIQUE(sku), FOREIGN KEY, CHECK(quantity >= 0)
//! ```
//!
//! Anything the database rejects after these pass is a conflict or an
//! unknown reference, never a malformed field.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_SKU_LEN: usize = 50;
const MAX_NAME_LEN: usize = 200;
const MAX_PRODUCT_TYPE_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 50 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_sku;
///
/// assert!(validate_sku("WID-001").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::required("sku"));
    }

    if sku.chars().count() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::invalid(
            "sku",
            "must contain only letters, numbers, hyphens, and underscores",
        ));
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an optional product type label.
pub fn validate_product_type(product_type: &str) -> ValidationResult<()> {
    if product_type.trim().is_empty() {
        return Err(ValidationError::invalid("product_type", "must not be blank"));
    }

    if product_type.chars().count() > MAX_PRODUCT_TYPE_LEN {
        return Err(ValidationError::TooLong {
            field: "product_type".to_string(),
            max: MAX_PRODUCT_TYPE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be zero or positive; an empty shelf is a valid starting point
pub fn validate_stock_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, samples)
///
/// ## Example
/// ```rust
/// use stockroom_core::money::Money;
/// use stockroom_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::from_cents(0)).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("WID-001").is_ok());
        assert!(validate_sku("ABC123").is_ok());
        assert!(validate_sku("product_1").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Steel Widget 10mm").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity("quantity", 0).is_ok());
        assert!(validate_stock_quantity("quantity", 5_000).is_ok());

        let err = validate_stock_quantity("initial_quantity", -1).unwrap_err();
        assert_eq!(err.to_string(), "initial_quantity must not be negative");
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert_eq!(
            validate_price(Money::from_cents(-1)).unwrap_err().to_string(),
            "price must not be negative"
        );
    }

    #[test]
    fn test_validate_product_type() {
        assert!(validate_product_type("fasteners").is_ok());
        assert!(validate_product_type("  ").is_err());
    }
}

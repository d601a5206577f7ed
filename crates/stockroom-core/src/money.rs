//! # Money Module
//!
//! Exact prices. Requests carry decimal text, the database carries integer
//! cents, and no binary float sits between the two.
//!
//! ## Round Trip
//! ```text
//! ┌──────────────────────┐  parse_decimal  ┌──────────────┐  to_decimal  ┌──────────────┐
//! │ "10.99" / 10.99 JSON │ ──────────────► │ Money(1099)  │ ───────────► │ "10.99"      │
//! │ request body         │                 │ price_cents  │              │ GET response │
//! └──────────────────────┘                 └──────────────┘              └──────────────┘
//!            │
//!            └── "10.999", "1e3", "abc" ──► ValidationError::InvalidPriceFormat
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price = Money::parse_decimal("19.5").unwrap();
//! assert_eq!(price.cents(), 1950);
//! assert_eq!(price.to_decimal().to_string(), "19.50");
//!
//! // Sub-cent precision is refused instead of being rounded away
//! assert!(Money::parse_decimal("19.999").is_err());
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of fractional digits in the smallest currency unit.
const MINOR_UNIT_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// An amount of money held as whole cents.
///
/// `i64` matches the SQLite INTEGER column that stores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Wraps a raw cent count, e.g. a `price_cents` column.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses an exact decimal string such as `"10.99"` or `"5"`.
    ///
    /// ## Rules
    /// - Plain decimal notation only (no exponent, no thousands separators)
    /// - At most two fractional digits; trailing zeros beyond that are fine
    ///   (`"1.500"` is 150 cents)
    /// - Must fit in i64 cents
    ///
    /// The sign is preserved; callers decide whether negatives are allowed.
    pub fn parse_decimal(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidPriceFormat {
            input: input.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let decimal = Decimal::from_str_exact(trimmed).map_err(|_| invalid())?;
        let decimal = decimal.normalize();
        if decimal.scale() > MINOR_UNIT_SCALE {
            return Err(invalid());
        }

        let cents = decimal
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| c.to_i64())
            .ok_or_else(invalid)?;

        Ok(Money(cents))
    }

    /// Returns the value as an exact decimal with two fractional digits.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(500).to_decimal().to_string(), "5.00");
    /// ```
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MINOR_UNIT_SCALE)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Log-friendly rendering such as `$10.99` or `-$5.50`.
///
/// API responses carry [`Money::to_decimal`] instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}${}", sign, self.to_decimal().abs())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_decimal(s)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

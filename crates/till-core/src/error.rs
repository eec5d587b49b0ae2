//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Registration and cart operation failures       │
//! │  └── ValidationError  - Malformed input (prices, promotion params)     │
//! │                                                                         │
//! │  till-cli errors (separate crate)                                      │
//! │  └── CliError         - Config, scenario file, core failures           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! Every error aborts the single operation it occurs in. Inventory and cart
//! state are left exactly as they were before the call.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by inventory registration and cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Product name is longer than [`crate::MAX_NAME_LENGTH`] characters.
    #[error("Product name '{name}' exceeds {max} characters")]
    InvalidName { name: String, max: usize },

    /// Unit price is outside the accepted range.
    ///
    /// ## When This Occurs
    /// - Price is zero or negative
    /// - Price is above 999.99
    #[error("Price {price} is not in the range of {min} and {max}")]
    InvalidPrice { price: Money, min: Money, max: Money },

    /// A product with the same name is already registered.
    #[error("Product '{0}' already exists")]
    DuplicateProduct(String),

    /// A coupon with the same name is already registered.
    #[error("Coupon '{0}' already exists")]
    DuplicateCoupon(String),

    /// The cart was asked for a product the inventory does not know.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// The resulting line quantity would leave `[1, 99]`.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart holds 95 × Tea
    ///      │
    ///      ▼
    /// add("Tea", 5)
    ///      │
    ///      ▼
    /// InvalidQuantity { product: "Tea", requested: 100, max: 99 }
    ///      │
    ///      ▼
    /// Cart still holds 95 × Tea
    /// ```
    #[error("Quantity of {product} would become {requested}, must be between 1 and {max}")]
    InvalidQuantity {
        product: String,
        requested: i64,
        max: i64,
    },

    /// The cart was asked to use a coupon the inventory does not know.
    #[error("Unknown coupon: {0}")]
    UnknownCoupon(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while turning external input (decimal text, promotion and coupon
/// specs) into domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparsable decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidQuantity {
            product: "Green Tea".to_string(),
            requested: 100,
            max: 99,
        };
        assert_eq!(
            err.to_string(),
            "Quantity of Green Tea would become 100, must be between 1 and 99"
        );

        let err = CoreError::InvalidPrice {
            price: Money::from_cents(0),
            min: Money::from_cents(1),
            max: Money::from_cents(99_999),
        };
        assert_eq!(
            err.to_string(),
            "Price $0.00 is not in the range of $0.01 and $999.99"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "package size".to_string(),
        };
        assert_eq!(err.to_string(), "package size must be positive");
    }

    #[test]
    fn test_every_validation_error_has_a_message() {
        let errors = [
            ValidationError::Required { field: "amount".to_string() },
            ValidationError::OutOfRange { field: "coupon percent".to_string(), min: 0, max: 100 },
            ValidationError::MustBePositive { field: "package size".to_string() },
            ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: "'1.234' has more than two decimal places".to_string(),
            },
        ];
        for err in &errors {
            let expected = match err {
                ValidationError::Required { .. } => "amount is required",
                ValidationError::OutOfRange { .. } => "coupon percent must be between 0 and 100",
                ValidationError::MustBePositive { .. } => "package size must be positive",
                ValidationError::InvalidFormat { .. } => {
                    "amount has invalid format: '1.234' has more than two decimal places"
                }
            };
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

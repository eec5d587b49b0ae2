//! # Validation Module
//!
//! Input validation for catalog registration and cart updates.
//!
//! ## Where Checks Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Inventory::register                                                   │
//! │  ├── validate_product_name   (≤ 40 characters)                         │
//! │  ├── validate_unit_price     (0.01 ..= 999.99)                         │
//! │  └── PromotionSpec::resolve  (validate_divisor, validate_percentage)   │
//! │                                                                         │
//! │  Inventory::register_coupon                                            │
//! │  └── CouponSpec::resolve     (validate_percentage, non-negative amount)│
//! │                                                                         │
//! │  Cart::add                                                             │
//! │  └── validate_quantity       (1 ..= 99 after the update)               │
//! │                                                                         │
//! │  All checks run BEFORE any state changes                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Percentage};
use crate::{MAX_LINE_QUANTITY, MAX_NAME_LENGTH, MAX_UNIT_PRICE, MIN_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - At most [`MAX_NAME_LENGTH`] characters (counted as chars, not bytes)
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Earl Grey").is_ok());
/// assert!(validate_product_name(&"A".repeat(41)).is_err());
/// ```
pub fn validate_product_name(name: &str) -> CoreResult<()> {
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::InvalidName {
            name: name.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Between [`MIN_UNIT_PRICE`] and [`MAX_UNIT_PRICE`], inclusive
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(1)).is_ok());
/// assert!(validate_unit_price(Money::from_cents(99_999)).is_ok());
/// assert!(validate_unit_price(Money::from_cents(0)).is_err());
/// assert!(validate_unit_price(Money::from_cents(100_000)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> CoreResult<()> {
    if price < MIN_UNIT_PRICE || price > MAX_UNIT_PRICE {
        return Err(CoreError::InvalidPrice {
            price,
            min: MIN_UNIT_PRICE,
            max: MAX_UNIT_PRICE,
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates the quantity a cart line would hold after an update.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_LINE_QUANTITY`] (99)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: add("Tea", 4) with 3 already in cart                             │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity("Tea", 7) ← THIS FUNCTION                            │
/// │       │                                                                 │
/// │       ├── 7 <= 0?  → InvalidQuantity                                    │
/// │       ├── 7 > 99?  → InvalidQuantity                                    │
/// │       └── OK → line quantity becomes 7                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(product: &str, quantity: i64) -> CoreResult<()> {
    if quantity <= 0 || quantity > MAX_LINE_QUANTITY {
        return Err(CoreError::InvalidQuantity {
            product: product.to_string(),
            requested: quantity,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Discount Parameter Validators
// =============================================================================

/// Validates a whole-unit divisor (free-item interval, package size).
///
/// Zero would make the promotion divide by zero.
pub fn validate_divisor(field: &str, value: u32) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a discount rate.
///
/// ## Rules
/// - Between 0% and 100% (0 to 10000 bps)
pub fn validate_percentage(field: &str, rate: Percentage) -> ValidationResult<()> {
    if rate > Percentage::FULL {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a fixed coupon amount.
///
/// ## Rules
/// - Must not be negative (a negative coupon would raise the total)
pub fn validate_coupon_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "coupon amount".to_string(),
            min: 0,
            max: i64::MAX,
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
    fn test_validate_product_name() {
        assert!(validate_product_name("").is_ok());
        assert!(validate_product_name(&"A".repeat(40)).is_ok());
        // 40 multi-byte characters are still 40 characters
        assert!(validate_product_name(&"ч".repeat(40)).is_ok());

        assert!(matches!(
            validate_product_name(&"A".repeat(41)),
            Err(CoreError::InvalidName { max: 40, .. })
        ));
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_cents(1)).is_ok());
        assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
        assert!(validate_unit_price(Money::from_cents(99_999)).is_ok());

        assert!(validate_unit_price(Money::from_cents(0)).is_err());
        assert!(validate_unit_price(Money::from_cents(-100)).is_err());
        assert!(validate_unit_price(Money::from_cents(100_000)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("Tea", 1).is_ok());
        assert!(validate_quantity("Tea", 99).is_ok());

        assert!(validate_quantity("Tea", 0).is_err());
        assert!(validate_quantity("Tea", -1).is_err());
        assert!(validate_quantity("Tea", 100).is_err());
    }

    #[test]
    fn test_validate_discount_parameters() {
        assert!(validate_divisor("package size", 1).is_ok());
        assert!(validate_divisor("package size", 0).is_err());

        assert!(validate_percentage("percent", Percentage::from_percent(0)).is_ok());
        assert!(validate_percentage("percent", Percentage::from_percent(100)).is_ok());
        assert!(validate_percentage("percent", Percentage::from_bps(10_001)).is_err());

        assert!(validate_coupon_amount(Money::zero()).is_ok());
        assert!(validate_coupon_amount(Money::from_cents(-1)).is_err());
    }
}

//! # till-core: Pure Pricing Logic for Till
//!
//! This crate is the **heart** of Till. It prices carts and renders invoices
//! as pure computations over in-memory data, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-cli (apps/till-cli)                     │   │
//! │  │    scenario.json ──► register ──► cart ──► invoice on stdout    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ promotion │  │ inventory │  │  invoice  │  │   │
//! │  │   │   Money   │  │  coupon   │  │   cart    │  │  render   │  │   │
//! │  │   │Percentage │  │  Product  │  │CartTotals │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money (integer cents) and Percentage (basis points)
//! - [`promotion`] - Per-product volume discounts
//! - [`coupon`] - Cart-wide discounts
//! - [`types`] - Product
//! - [`inventory`] - Product and coupon registry
//! - [`cart`] - Quantities, coupon selection, totals
//! - [`invoice`] - Fixed-width invoice text
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Same cart state = same totals = same invoice bytes
//! 2. **No I/O**: Files, network and stdout belong to the app crate
//! 3. **Integer Money**: All monetary values are cents (i64), rates are bps
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{CouponSpec, Inventory, Money, PromotionSpec};
//!
//! let mut inventory = Inventory::new();
//! inventory
//!     .register("Green Tea", Money::from_cents(79), &PromotionSpec::GetOneFree { every: 3 })
//!     .unwrap();
//! inventory
//!     .register_coupon("TEATIME", &CouponSpec::Percent { percent: 20 })
//!     .unwrap();
//!
//! let mut cart = inventory.new_cart();
//! cart.add("Green Tea", 8).unwrap();
//! cart.use_coupon("TEATIME").unwrap();
//!
//! // 8 × 0.79 = 6.32, 2 free → 4.74, 20% off → 3.79
//! assert_eq!(cart.total(), Money::from_cents(379));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod coupon;
pub mod error;
pub mod inventory;
pub mod invoice;
pub mod money;
pub mod promotion;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use coupon::{Coupon, CouponKind, CouponSpec};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::Inventory;
pub use money::{Money, Percentage};
pub use promotion::{Promotion, PromotionSpec};
pub use types::Product;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in characters.
///
/// ## Business Reason
/// The invoice name column is 44 characters wide.
pub const MAX_NAME_LENGTH: usize = 40;

/// Lowest accepted unit price ($0.01).
pub const MIN_UNIT_PRICE: Money = Money::from_cents(1);

/// Highest accepted unit price ($999.99).
pub const MAX_UNIT_PRICE: Money = Money::from_cents(99_999);

/// Maximum quantity of a single product in a cart.
///
/// ## Business Reason
/// The invoice quantity column is two digits wide.
pub const MAX_LINE_QUANTITY: i64 = 99;

// =============================================================================
// Property Tests
// =============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn promotion_spec() -> impl Strategy<Value = PromotionSpec> {
        prop_oneof![
            Just(PromotionSpec::None),
            (1u32..=10).prop_map(|every| PromotionSpec::GetOneFree { every }),
            (1u32..=10, 0u32..=100)
                .prop_map(|(size, percent)| PromotionSpec::Package { size, percent }),
            (0u32..=20, 0u32..=100)
                .prop_map(|(count, percent)| PromotionSpec::Threshold { count, percent }),
        ]
    }

    proptest! {
        /// Any name up to 40 chars with a price in range registers and is found
        #[test]
        fn prop_valid_registration_is_found(
            name in "[a-zA-Z0-9 ]{0,40}",
            cents in 1i64..=99_999,
            spec in promotion_spec(),
        ) {
            let mut inventory = Inventory::new();
            inventory.register(&name, Money::from_cents(cents), &spec).unwrap();

            let found = inventory.find_product(&name).unwrap();
            prop_assert_eq!(found.unit_price().cents(), cents);
            prop_assert_eq!(found.promotion(), &spec.resolve().unwrap());
        }

        /// A second registration under the same name always fails
        #[test]
        fn prop_duplicate_name_always_rejected(
            first in 1i64..=99_999,
            second in 1i64..=99_999,
            spec in promotion_spec(),
        ) {
            let mut inventory = Inventory::new();
            inventory.register("Tea", Money::from_cents(first), &PromotionSpec::None).unwrap();

            let result = inventory.register("Tea", Money::from_cents(second), &spec);
            prop_assert_eq!(result.unwrap_err(), CoreError::DuplicateProduct("Tea".to_string()));
        }

        /// Adds accumulate while in range, and a rejected add changes nothing
        #[test]
        fn prop_add_accumulates_or_rejects(
            deltas in prop::collection::vec(-120i64..=120, 1..20),
        ) {
            let mut inventory = Inventory::new();
            inventory.register("Tea", Money::from_cents(100), &PromotionSpec::None).unwrap();
            let mut cart = inventory.new_cart();

            let mut expected = 0i64;
            for delta in deltas {
                let next = expected + delta;
                let result = cart.add("Tea", delta);
                if (1..=MAX_LINE_QUANTITY).contains(&next) {
                    prop_assert!(result.is_ok());
                    expected = next;
                } else {
                    let rejected = matches!(result, Err(CoreError::InvalidQuantity { .. }));
                    prop_assert!(rejected);
                }
                prop_assert_eq!(cart.quantity_of("Tea"), expected);
            }
        }

        /// Promotions never discount more than the line is worth
        #[test]
        fn prop_promotion_bounded_by_gross(
            cents in 1i64..=99_999,
            quantity in 1i64..=99,
            spec in promotion_spec(),
        ) {
            let promotion = spec.resolve().unwrap();
            let unit = Money::from_cents(cents);
            let discount = promotion.discount(unit, quantity);
            prop_assert!(discount >= Money::zero());
            prop_assert!(discount <= unit * quantity);
        }

        /// total() = subtotal - coupon discount, and is never negative
        #[test]
        fn prop_total_round_trip(
            lines in prop::collection::vec((1i64..=99_999, 1i64..=99, promotion_spec()), 0..6),
            coupon in prop::option::of(prop_oneof![
                (0u32..=100).prop_map(|percent| CouponSpec::Percent { percent }),
                (0i64..=500_000).prop_map(|cents| CouponSpec::Amount { amount: Money::from_cents(cents) }),
            ]),
        ) {
            let mut inventory = Inventory::new();
            for (index, (cents, _, spec)) in lines.iter().enumerate() {
                inventory.register(&format!("P{index}"), Money::from_cents(*cents), spec).unwrap();
            }
            if let Some(spec) = &coupon {
                inventory.register_coupon("C", spec).unwrap();
            }

            let mut cart = inventory.new_cart();
            for (index, (_, quantity, _)) in lines.iter().enumerate() {
                cart.add(&format!("P{index}"), *quantity).unwrap();
            }
            if coupon.is_some() {
                cart.use_coupon("C").unwrap();
            }

            let subtotal = cart.total_without_coupon();
            let expected = match cart.coupon() {
                Some(coupon) => subtotal - coupon.discount(subtotal),
                None => subtotal,
            };
            prop_assert_eq!(cart.total(), expected);
            prop_assert!(cart.total() >= Money::zero());
            prop_assert_eq!(cart.invoice(), cart.invoice());
        }
    }
}

//! # Domain Types
//!
//! Catalog entries sold through a [`crate::cart::Cart`].
//!
//! ```text
//! ┌─────────────────┐
//! │    Product      │
//! │  ─────────────  │
//! │  name (≤ 40)    │
//! │  unit_price     │──► Money, 0.01 ..= 999.99
//! │  promotion      │──► Promotion (owned, never shared)
//! └─────────────────┘
//! ```
//!
//! Products are created only by [`crate::inventory::Inventory::register`],
//! which validates them first, and are immutable afterwards.

use crate::money::Money;
use crate::promotion::Promotion;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    name: String,
    unit_price: Money,
    promotion: Promotion,
}

impl Product {
    /// Creates a product from already validated parts.
    pub(crate) fn new(name: String, unit_price: Money, promotion: Promotion) -> Self {
        Product {
            name,
            unit_price,
            promotion,
        }
    }

    /// Display name, also the lookup key in the inventory.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn promotion(&self) -> &Promotion {
        &self.promotion
    }

    /// Price of `quantity` units before any promotion.
    #[inline]
    pub fn gross(&self, quantity: i64) -> Money {
        self.unit_price.multiply_quantity(quantity)
    }

    /// Promotional discount for `quantity` units.
    #[inline]
    pub fn discount(&self, quantity: i64) -> Money {
        self.promotion.discount(self.unit_price, quantity)
    }

    /// Price of `quantity` units after the promotion.
    pub fn line_total(&self, quantity: i64) -> Money {
        self.gross(quantity) - self.discount(quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

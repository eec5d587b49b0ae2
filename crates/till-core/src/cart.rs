//! # Cart
//!
//! Accumulates quantities per product, optionally holds one coupon, and
//! computes totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller Action            Cart Method             State Change          │
//! │  ─────────────            ───────────             ────────────          │
//! │                                                                         │
//! │  Scan product ───────────► add(name, qty) ───────► line.qty += qty      │
//! │                                                                         │
//! │  Enter coupon ───────────► use_coupon(name) ─────► coupon = Some(..)    │
//! │                                                                         │
//! │  Show totals ────────────► total_without_coupon()  (read only)          │
//! │                            total()                                      │
//! │                                                                         │
//! │  Print ──────────────────► invoice() ────────────► (read only)          │
//! │                                                                         │
//! │  NOTE: A rejected add/use_coupon leaves the cart untouched.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Each line's promotion discount is rounded to the cent on its own, and the
//! coupon discount is rounded once on the subtotal. Lines are summed as exact
//! cents, so their order never changes a total.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::coupon::Coupon;
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;

/// One product and the quantity of it in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: i64,
}

impl CartLine<'_> {
    /// Unit price × quantity.
    pub fn gross(&self) -> Money {
        self.product.gross(self.quantity)
    }

    /// Promotional discount on this line.
    pub fn discount(&self) -> Money {
        self.product.discount(self.quantity)
    }

    /// Gross minus the promotional discount.
    pub fn total(&self) -> Money {
        self.product.line_total(self.quantity)
    }
}

/// A shopping cart bound to an [`Inventory`].
///
/// ## Invariants
/// - Every line refers to a product of the bound inventory
/// - Lines are unique per product (adding the same product again
///   accumulates), kept in first-add order
/// - Every line quantity is within `1 ..= 99`
/// - At most one coupon; choosing another replaces it
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    inventory: &'a Inventory,
    lines: Vec<CartLine<'a>>,
    coupon: Option<&'a Coupon>,
}

impl<'a> Cart<'a> {
    /// Creates an empty cart. Use [`Inventory::new_cart`].
    pub(crate) fn new(inventory: &'a Inventory) -> Self {
        Cart {
            inventory,
            lines: Vec::new(),
            coupon: None,
        }
    }

    /// Adds `quantity` units of a product (negative values take units out).
    ///
    /// ## Behavior
    /// - Unknown product → [`CoreError::UnknownProduct`]
    /// - Resulting quantity outside `1 ..= 99` → [`CoreError::InvalidQuantity`]
    /// - Otherwise the line quantity becomes `current + quantity`
    ///
    /// ## Example
    /// ```rust
    /// use till_core::inventory::Inventory;
    /// use till_core::money::Money;
    /// use till_core::promotion::PromotionSpec;
    ///
    /// let mut inventory = Inventory::new();
    /// inventory.register("Tea", Money::from_cents(100), &PromotionSpec::None).unwrap();
    ///
    /// let mut cart = inventory.new_cart();
    /// cart.add("Tea", 3).unwrap();
    /// cart.add("Tea", 4).unwrap();
    /// assert_eq!(cart.quantity_of("Tea"), 7);
    /// ```
    pub fn add(&mut self, name: &str, quantity: i64) -> CoreResult<()> {
        let Some(product) = self.inventory.find_product(name) else {
            warn!(product = name, "Cart add rejected: unknown product");
            return Err(CoreError::UnknownProduct(name.to_string()));
        };

        let new_quantity = self.quantity_of(name).saturating_add(quantity);
        if let Err(err) = validate_quantity(name, new_quantity) {
            warn!(product = name, requested = new_quantity, "Cart add rejected: quantity");
            return Err(err);
        }

        match self.lines.iter_mut().find(|line| line.product.name() == name) {
            Some(line) => line.quantity = new_quantity,
            None => self.lines.push(CartLine {
                product,
                quantity: new_quantity,
            }),
        }

        debug!(product = name, quantity = new_quantity, "Cart line updated");
        Ok(())
    }

    /// Adds a single unit of a product.
    pub fn add_one(&mut self, name: &str) -> CoreResult<()> {
        self.add(name, 1)
    }

    /// Selects the coupon to apply, replacing any previous selection.
    ///
    /// Fails with [`CoreError::UnknownCoupon`] if the inventory has no coupon
    /// by that name; the current selection is kept in that case.
    pub fn use_coupon(&mut self, name: &str) -> CoreResult<()> {
        let Some(coupon) = self.inventory.find_coupon(name) else {
            warn!(coupon = name, "Coupon rejected: unknown coupon");
            return Err(CoreError::UnknownCoupon(name.to_string()));
        };

        if let Some(previous) = self.coupon {
            debug!(previous = previous.name(), coupon = name, "Coupon replaced");
        } else {
            debug!(coupon = name, "Coupon selected");
        }
        self.coupon = Some(coupon);
        Ok(())
    }

    /// Quantity of a product in the cart, zero when it has no line.
    pub fn quantity_of(&self, name: &str) -> i64 {
        self.lines
            .iter()
            .find(|line| line.product.name() == name)
            .map_or(0, |line| line.quantity)
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// The selected coupon, if any.
    pub fn coupon(&self) -> Option<&'a Coupon> {
        self.coupon
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of unit price × quantity over all lines.
    pub fn gross_total(&self) -> Money {
        self.lines.iter().map(CartLine::gross).sum()
    }

    /// Sum of all promotional discounts.
    pub fn discount_total(&self) -> Money {
        self.lines.iter().map(CartLine::discount).sum()
    }

    /// Subtotal after promotions, before the coupon.
    pub fn total_without_coupon(&self) -> Money {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Discount granted by the selected coupon, zero without one.
    pub fn coupon_discount(&self) -> Money {
        self.coupon
            .map_or(Money::zero(), |coupon| coupon.discount(self.total_without_coupon()))
    }

    /// Amount due: the subtotal minus the coupon discount.
    pub fn total(&self) -> Money {
        self.total_without_coupon() - self.coupon_discount()
    }

    /// Renders the invoice for the current cart state.
    pub fn invoice(&self) -> String {
        crate::invoice::render(self)
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub gross_cents: i64,
    pub promotion_discount_cents: i64,
    pub subtotal_cents: i64,
    pub coupon: Option<String>,
    pub coupon_discount_cents: i64,
    pub total_cents: i64,
}

impl From<&Cart<'_>> for CartTotals {
    fn from(cart: &Cart<'_>) -> Self {
        CartTotals {
            line_count: cart.lines.len(),
            total_quantity: cart.lines.iter().map(|line| line.quantity).sum(),
            gross_cents: cart.gross_total().cents(),
            promotion_discount_cents: cart.discount_total().cents(),
            subtotal_cents: cart.total_without_coupon().cents(),
            coupon: cart.coupon.map(|coupon| coupon.name().to_string()),
            coupon_discount_cents: cart.coupon_discount().cents(),
            total_cents: cart.total().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

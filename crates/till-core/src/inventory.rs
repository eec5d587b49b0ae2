//! # Inventory
//!
//! Registry of products and coupons. It is the only place where either is
//! created, and it owns their uniqueness rules.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  register / register_coupon      (&mut Inventory, append only)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  new_cart()  ──► Cart<'_> borrows &Inventory                            │
//! │       │          (the borrow checker keeps the catalog frozen while     │
//! │       │           any cart is open)                                     │
//! │       ▼                                                                 │
//! │  cart dropped ──► registration possible again                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use crate::cart::Cart;
use crate::coupon::{Coupon, CouponSpec};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promotion::{Promotion, PromotionSpec};
use crate::types::Product;
use crate::validation::{validate_product_name, validate_unit_price};

/// Products and coupons, both kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: Vec<Product>,
    coupons: Vec<Coupon>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product.
    ///
    /// ## Checks (in order)
    /// 1. Name is at most 40 characters → [`CoreError::InvalidName`]
    /// 2. Price within 0.01 ..= 999.99 → [`CoreError::InvalidPrice`]
    /// 3. Name not yet registered → [`CoreError::DuplicateProduct`]
    /// 4. Promotion parameters valid → [`CoreError::Validation`]
    ///
    /// Nothing is stored unless every check passes.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::inventory::Inventory;
    /// use till_core::money::Money;
    /// use till_core::promotion::PromotionSpec;
    ///
    /// let mut inventory = Inventory::new();
    /// inventory
    ///     .register("Green Tea", Money::from_cents(79), &PromotionSpec::GetOneFree { every: 3 })
    ///     .unwrap();
    /// assert!(inventory.find_product("Green Tea").is_some());
    /// ```
    pub fn register(
        &mut self,
        name: &str,
        unit_price: Money,
        promotion: &PromotionSpec,
    ) -> CoreResult<&Product> {
        let result = self.check_product(name, unit_price, promotion);
        let promotion = match result {
            Ok(promotion) => promotion,
            Err(err) => {
                warn!(product = name, error = %err, "Product registration rejected");
                return Err(err);
            }
        };

        debug!(product = name, price = %unit_price, ?promotion, "Registered product");
        self.products
            .push(Product::new(name.to_string(), unit_price, promotion));
        Ok(&self.products[self.products.len() - 1])
    }

    fn check_product(
        &self,
        name: &str,
        unit_price: Money,
        promotion: &PromotionSpec,
    ) -> CoreResult<Promotion> {
        validate_product_name(name)?;
        validate_unit_price(unit_price)?;
        if self.find_product(name).is_some() {
            return Err(CoreError::DuplicateProduct(name.to_string()));
        }
        Ok(promotion.resolve()?)
    }

    /// Registers a coupon.
    ///
    /// Coupon names are unique, the same as product names: a second
    /// registration under an existing name fails with
    /// [`CoreError::DuplicateCoupon`].
    pub fn register_coupon(&mut self, name: &str, spec: &CouponSpec) -> CoreResult<&Coupon> {
        if self.find_coupon(name).is_some() {
            warn!(coupon = name, "Coupon registration rejected: duplicate name");
            return Err(CoreError::DuplicateCoupon(name.to_string()));
        }
        let coupon = spec.resolve(name)?;

        debug!(coupon = name, kind = ?coupon.kind(), "Registered coupon");
        self.coupons.push(coupon);
        Ok(&self.coupons[self.coupons.len() - 1])
    }

    /// Looks up a product by exact name.
    pub fn find_product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.name() == name)
    }

    /// Looks up a coupon by exact name.
    pub fn find_coupon(&self, name: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|coupon| coupon.name() == name)
    }

    /// Products in registration order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Coupons in registration order.
    pub fn coupons(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.iter()
    }

    /// Number of registered products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Opens an empty cart against this inventory.
    pub fn new_cart(&self) -> Cart<'_> {
        Cart::new(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

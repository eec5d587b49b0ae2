//! # Scenario Files
//!
//! A scenario is one checkout described as JSON: the catalog, the coupons,
//! the scanned items and the coupon the customer hands over.
//!
//! ```json
//! {
//!   "products": [
//!     {"name": "Green Tea", "price": "0.79", "promotion": {"kind": "get_one_free", "every": 3}},
//!     {"name": "Milk", "price": 1.5}
//!   ],
//!   "coupons": [
//!     {"name": "TEATIME", "discount": {"kind": "percent", "percent": 20}}
//!   ],
//!   "order": [
//!     {"product": "Green Tea", "quantity": 8},
//!     {"product": "Milk"}
//!   ],
//!   "coupon": "TEATIME"
//! }
//! ```

use serde::Deserialize;
use tracing::info;

use till_core::money::{self, Money};
use till_core::{Cart, CouponSpec, CoreResult, Inventory, PromotionSpec};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub coupons: Vec<CouponEntry>,
    #[serde(default)]
    pub order: Vec<OrderEntry>,
    #[serde(default)]
    pub coupon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductEntry {
    pub name: String,
    #[serde(deserialize_with = "money::decimal::deserialize")]
    pub price: Money,
    #[serde(default)]
    pub promotion: PromotionSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CouponEntry {
    pub name: String,
    pub discount: CouponSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderEntry {
    pub product: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Registers every product and coupon, in file order.
    pub fn build_inventory(&self) -> CoreResult<Inventory> {
        let mut inventory = Inventory::new();
        for product in &self.products {
            inventory.register(&product.name, product.price, &product.promotion)?;
        }
        for coupon in &self.coupons {
            inventory.register_coupon(&coupon.name, &coupon.discount)?;
        }
        info!(
            products = inventory.len(),
            coupons = inventory.coupons().count(),
            "Inventory loaded"
        );
        Ok(inventory)
    }

    /// Fills a cart from the order and applies the coupon, if any.
    pub fn checkout<'a>(&self, inventory: &'a Inventory) -> CoreResult<Cart<'a>> {
        let mut cart = inventory.new_cart();
        for entry in &self.order {
            cart.add(&entry.product, entry.quantity)?;
        }
        if let Some(coupon) = &self.coupon {
            cart.use_coupon(coupon)?;
        }
        info!(total = %cart.total(), "Checkout complete");
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::CoreError;

    const SAMPLE: &str = r#"{
        "products": [
            {"name": "Green Tea", "price": "0.79", "promotion": {"kind": "get_one_free", "every": 3}},
            {"name": "Milk", "price": 1.5}
        ],
        "coupons": [
            {"name": "TEATIME", "discount": {"kind": "percent", "percent": 20}}
        ],
        "order": [
            {"product": "Green Tea", "quantity": 8},
            {"product": "Milk"}
        ],
        "coupon": "TEATIME"
    }"#;

    #[test]
    fn test_sample_scenario_checkout() {
        let scenario = Scenario::from_json(SAMPLE).unwrap();
        let inventory = scenario.build_inventory().unwrap();
        let cart = scenario.checkout(&inventory).unwrap();

        assert_eq!(cart.quantity_of("Green Tea"), 8);
        assert_eq!(cart.quantity_of("Milk"), 1);
        // 4.74 + 1.50 = 6.24, 20% off = 1.25 → 4.99
        assert_eq!(cart.total_without_coupon(), Money::from_cents(624));
        assert_eq!(cart.total(), Money::from_cents(499));
    }

    #[test]
    fn test_bundled_tea_shop_scenario() {
        let scenario = Scenario::from_json(include_str!("../scenarios/tea-shop.json")).unwrap();
        let inventory = scenario.build_inventory().unwrap();
        let cart = scenario.checkout(&inventory).unwrap();

        // 4.74 + 8.36 + 7.20 + 2.49
        assert_eq!(cart.total_without_coupon(), Money::from_cents(2279));
        assert_eq!(cart.coupon_discount(), Money::from_cents(456));
        assert_eq!(cart.total(), Money::from_cents(1823));
        assert!(cart.invoice().contains("|    18.23 |"));
    }

    #[test]
    fn test_missing_promotion_means_none() {
        let scenario = Scenario::from_json(SAMPLE).unwrap();
        assert_eq!(scenario.products[1].promotion, PromotionSpec::None);
        assert_eq!(scenario.products[1].price, Money::from_cents(150));
    }

    #[test]
    fn test_core_errors_surface() {
        let scenario = Scenario::from_json(
            r#"{"products": [{"name": "Tea", "price": "1.00"}], "order": [{"product": "Coffee"}]}"#,
        )
        .unwrap();
        let inventory = scenario.build_inventory().unwrap();

        assert_eq!(
            scenario.checkout(&inventory).unwrap_err(),
            CoreError::UnknownProduct("Coffee".to_string())
        );
    }

    #[test]
    fn test_duplicate_product_in_catalog() {
        let scenario = Scenario::from_json(
            r#"{"products": [{"name": "Tea", "price": "1.00"}, {"name": "Tea", "price": "2.00"}]}"#,
        )
        .unwrap();

        assert!(matches!(
            scenario.build_inventory(),
            Err(CoreError::DuplicateProduct(_))
        ));
    }

    #[test]
    fn test_number_price_with_excess_precision_is_rejected() {
        let result =
            Scenario::from_json(r#"{"products": [{"name": "Tea", "price": 10.999999999999999999}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_promotion_without_kind_means_none() {
        let scenario = Scenario::from_json(
            r#"{"products": [{"name": "Tea", "price": 2, "promotion": {"every": 3}}]}"#,
        )
        .unwrap();
        assert_eq!(scenario.products[0].promotion, PromotionSpec::None);
    }

    #[test]
    fn test_rejects_malformed_price() {
        let result = Scenario::from_json(r#"{"products": [{"name": "Tea", "price": "1.234"}]}"#);
        assert!(result.is_err());
    }
}

//! # Coupons
//!
//! Cart-wide discounts, applied once to the subtotal left after promotions.
//!
//! ```text
//! Percent(p%)   discount = subtotal × p%
//! Amount(a)     discount = min(subtotal, a)   never below a zero total
//! ```

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::money::{self, Money, Percentage};
use crate::promotion::whole_percent;
use crate::validation::{validate_coupon_amount, validate_percentage, ValidationResult};

/// How a coupon discounts the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponKind {
    /// A share of the subtotal.
    Percent(Percentage),
    /// A fixed amount, capped at the subtotal.
    Amount(Money),
}

/// A named coupon registered in the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    name: String,
    kind: CouponKind,
}

impl Coupon {
    /// Builds a percentage coupon.
    pub fn percent(name: impl Into<String>, rate: Percentage) -> ValidationResult<Self> {
        validate_percentage("coupon percent", rate)?;
        Ok(Coupon {
            name: name.into(),
            kind: CouponKind::Percent(rate),
        })
    }

    /// Builds a fixed-amount coupon.
    pub fn amount(name: impl Into<String>, amount: Money) -> ValidationResult<Self> {
        validate_coupon_amount(amount)?;
        Ok(Coupon {
            name: name.into(),
            kind: CouponKind::Amount(amount),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CouponKind {
        self.kind
    }

    /// Computes the discount on `subtotal`.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::coupon::Coupon;
    /// use till_core::money::Money;
    ///
    /// let coupon = Coupon::amount("TENOFF", Money::from_cents(1000)).unwrap();
    /// // Never more than the subtotal itself
    /// assert_eq!(coupon.discount(Money::from_cents(500)).cents(), 500);
    /// ```
    pub fn discount(&self, subtotal: Money) -> Money {
        match self.kind {
            CouponKind::Percent(rate) => subtotal.percentage_of(rate),
            CouponKind::Amount(amount) => amount.min(subtotal),
        }
    }

    /// Text shown after the coupon name on the invoice.
    pub fn description(&self) -> String {
        match self.kind {
            CouponKind::Percent(rate) => format!("- {}% off", rate),
            CouponKind::Amount(amount) => format!("- {} off", amount.to_plain_string()),
        }
    }
}

// =============================================================================
// Coupon Spec
// =============================================================================

/// External description of a coupon, as supplied at registration.
///
/// ## JSON Shape
/// ```json
/// {"kind": "percent", "percent": 10}
/// {"kind": "amount", "amount": "5.00"}
/// ```
/// Any other `kind` is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponSpec {
    Percent { percent: u32 },
    Amount { amount: Money },
}

const COUPON_KINDS: &[&str] = &["percent", "amount"];

/// Flat wire form. Read in one pass so `amount` keeps its exact number text.
#[derive(Deserialize)]
struct RawCouponSpec {
    kind: String,
    percent: Option<u32>,
    amount: Option<serde_json::Value>,
}

impl<'de> Deserialize<'de> for CouponSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawCouponSpec::deserialize(deserializer)?;
        let missing = |field: &'static str| <D::Error as de::Error>::missing_field(field);

        match raw.kind.as_str() {
            "percent" => Ok(CouponSpec::Percent {
                percent: raw.percent.ok_or_else(|| missing("percent"))?,
            }),
            "amount" => {
                let value = raw.amount.ok_or_else(|| missing("amount"))?;
                let amount = money::decimal::from_json(&value)
                    .map_err(<D::Error as de::Error>::custom)?;
                Ok(CouponSpec::Amount { amount })
            }
            other => Err(de::Error::unknown_variant(other, COUPON_KINDS)),
        }
    }
}

impl CouponSpec {
    /// Validates the parameters and builds a [`Coupon`] called `name`.
    pub fn resolve(&self, name: &str) -> ValidationResult<Coupon> {
        match *self {
            CouponSpec::Percent { percent } => {
                Coupon::percent(name, whole_percent("coupon percent", percent)?)
            }
            CouponSpec::Amount { amount } => Coupon::amount(name, amount),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

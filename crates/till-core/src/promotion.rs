//! # Promotions
//!
//! Per-product, quantity-dependent discounts.
//!
//! ## Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Promotion          discount(unit, qty)                   invoice text  │
//! │  ─────────────────  ────────────────────────────────────  ──────────── │
//! │  None               0                                     (no row)      │
//! │  BuyNGetOneFree(n)  unit × (qty / n)                      buy n-1, ...  │
//! │  Package(s, p%)     unit × s × (qty / s) × p%             get p% off... │
//! │  Threshold(c, p%)   unit × max(0, qty - c) × p%           p% off of ... │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The variant set is closed. A product owns its promotion outright, and the
//! promotion keeps no state between calls.

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::error::ValidationError;
use crate::money::{Money, Percentage};
use crate::validation::{validate_divisor, validate_percentage, ValidationResult};

// =============================================================================
// Promotion
// =============================================================================

/// A volume discount attached to one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Promotion {
    /// No discount.
    #[default]
    None,

    /// Every `every`-th unit is free.
    BuyNGetOneFree { every: u32 },

    /// `rate` off every complete package of `size` units.
    Package { size: u32, rate: Percentage },

    /// `rate` off every unit after the first `count`.
    Threshold { count: u32, rate: Percentage },
}

impl Promotion {
    /// Builds a "buy `every - 1`, get 1 free" promotion.
    pub fn get_one_free(every: u32) -> ValidationResult<Self> {
        validate_divisor("free item interval", every)?;
        Ok(Promotion::BuyNGetOneFree { every })
    }

    /// Builds a package promotion.
    pub fn package(size: u32, rate: Percentage) -> ValidationResult<Self> {
        validate_divisor("package size", size)?;
        validate_percentage("package percent", rate)?;
        Ok(Promotion::Package { size, rate })
    }

    /// Builds a threshold promotion.
    pub fn threshold(count: u32, rate: Percentage) -> ValidationResult<Self> {
        validate_percentage("threshold percent", rate)?;
        Ok(Promotion::Threshold { count, rate })
    }

    /// Checks if this is the empty promotion.
    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Promotion::None)
    }

    /// Computes the discount for `quantity` units at `unit_price`.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::{Money, Percentage};
    /// use till_core::promotion::Promotion;
    ///
    /// let promo = Promotion::package(5, Percentage::from_percent(10)).unwrap();
    /// // 12 units → 2 complete packages → 10 units × $10.00 × 10%
    /// assert_eq!(promo.discount(Money::from_cents(1000), 12).cents(), 1000);
    /// ```
    pub fn discount(&self, unit_price: Money, quantity: i64) -> Money {
        match *self {
            Promotion::None => Money::zero(),
            Promotion::BuyNGetOneFree { every } => {
                let free_units = quantity.checked_div(i64::from(every)).unwrap_or(0);
                unit_price.multiply_quantity(free_units)
            }
            Promotion::Package { size, rate } => {
                let size = i64::from(size);
                let packaged_units = quantity.checked_div(size).unwrap_or(0) * size;
                unit_price
                    .multiply_quantity(packaged_units)
                    .percentage_of(rate)
            }
            Promotion::Threshold { count, rate } => {
                let extra_units = (quantity - i64::from(count)).max(0);
                unit_price.multiply_quantity(extra_units).percentage_of(rate)
            }
        }
    }

    /// Human-readable description shown under the product on the invoice.
    ///
    /// Returns `None` for [`Promotion::None`].
    pub fn description(&self) -> Option<String> {
        match *self {
            Promotion::None => None,
            Promotion::BuyNGetOneFree { every } => {
                Some(format!("buy {}, get 1 free", every.saturating_sub(1)))
            }
            Promotion::Package { size, rate } => {
                Some(format!("get {}% off for every {}", rate, size))
            }
            Promotion::Threshold { count, rate } => Some(format!(
                "{}% off of every after the {}{}",
                rate,
                count,
                ordinal_suffix(count)
            )),
        }
    }
}

/// Suffix for the threshold count: 1st, 2nd, 3rd, everything else "th".
fn ordinal_suffix(number: u32) -> &'static str {
    match number {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

// =============================================================================
// Promotion Spec
// =============================================================================

/// External description of a promotion, as supplied at registration.
///
/// ## JSON Shape
/// ```json
/// {"kind": "get_one_free", "every": 3}
/// {"kind": "package", "size": 5, "percent": 10}
/// {"kind": "threshold", "count": 10, "percent": 20}
/// ```
/// Any other `kind`, a missing `kind`, or `null` resolves to no promotion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PromotionSpec {
    GetOneFree { every: u32 },
    Package { size: u32, percent: u32 },
    Threshold { count: u32, percent: u32 },
    #[default]
    None,
}

/// Flat wire form; `kind` decides which parameters are read.
#[derive(Deserialize)]
struct RawPromotionSpec {
    kind: Option<String>,
    every: Option<u32>,
    size: Option<u32>,
    count: Option<u32>,
    percent: Option<u32>,
}

impl<'de> Deserialize<'de> for PromotionSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<RawPromotionSpec>::deserialize(deserializer)? else {
            return Ok(PromotionSpec::None);
        };

        let missing = |field: &'static str| <D::Error as de::Error>::missing_field(field);
        let spec = match raw.kind.as_deref() {
            Some("get_one_free") => PromotionSpec::GetOneFree {
                every: raw.every.ok_or_else(|| missing("every"))?,
            },
            Some("package") => PromotionSpec::Package {
                size: raw.size.ok_or_else(|| missing("size"))?,
                percent: raw.percent.ok_or_else(|| missing("percent"))?,
            },
            Some("threshold") => PromotionSpec::Threshold {
                count: raw.count.ok_or_else(|| missing("count"))?,
                percent: raw.percent.ok_or_else(|| missing("percent"))?,
            },
            _ => PromotionSpec::None,
        };
        Ok(spec)
    }
}

impl PromotionSpec {
    /// Validates the parameters and builds the [`Promotion`].
    pub fn resolve(&self) -> ValidationResult<Promotion> {
        match *self {
            PromotionSpec::None => Ok(Promotion::None),
            PromotionSpec::GetOneFree { every } => Promotion::get_one_free(every),
            PromotionSpec::Package { size, percent } => {
                Promotion::package(size, whole_percent("package percent", percent)?)
            }
            PromotionSpec::Threshold { count, percent } => {
                Promotion::threshold(count, whole_percent("threshold percent", percent)?)
            }
        }
    }
}

/// Converts whole percents without overflowing the basis point scale.
pub(crate) fn whole_percent(field: &str, percent: u32) -> ValidationResult<Percentage> {
    if percent > 100 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(Percentage::from_percent(percent))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dollars(d: i64) -> Money {
        Money::from_major_minor(d, 0)
    }

    #[test]
    fn test_none_never_discounts() {
        assert_eq!(Promotion::None.discount(dollars(10), 50), Money::zero());
        assert_eq!(Promotion::None.description(), None);
    }

    #[test]
    fn test_buy_n_get_one_free() {
        let promo = Promotion::get_one_free(3).unwrap();
        // 7 units → 2 free
        assert_eq!(promo.discount(dollars(10), 7), dollars(20));
        assert_eq!(promo.discount(dollars(10), 2), Money::zero());
        assert_eq!(promo.description().unwrap(), "buy 2, get 1 free");
    }

    #[test]
    fn test_package_only_counts_complete_packages() {
        let promo = Promotion::package(5, Percentage::from_percent(10)).unwrap();
        assert_eq!(promo.discount(dollars(10), 12), dollars(10));
        assert_eq!(promo.discount(dollars(10), 4), Money::zero());
        assert_eq!(promo.description().unwrap(), "get 10% off for every 5");
    }

    #[test]
    fn test_package_rounds_once_per_line() {
        let promo = Promotion::package(3, Percentage::from_percent(15)).unwrap();
        // 3 × 1.11 × 15% = 0.4995 → 0.50
        assert_eq!(promo.discount(Money::from_cents(111), 3).cents(), 50);
    }

    #[test]
    fn test_threshold() {
        let promo = Promotion::threshold(10, Percentage::from_percent(20)).unwrap();
        // 5 extra units × $5.00 × 20%
        assert_eq!(promo.discount(dollars(5), 15), dollars(5));
        assert_eq!(promo.discount(dollars(5), 10), Money::zero());
        assert_eq!(promo.discount(dollars(5), 3), Money::zero());
        assert_eq!(
            promo.description().unwrap(),
            "20% off of every after the 10th"
        );
    }

    #[test]
    fn test_threshold_ordinal_suffixes() {
        let describe = |count| {
            Promotion::threshold(count, Percentage::from_percent(5))
                .unwrap()
                .description()
                .unwrap()
        };
        assert!(describe(1).ends_with("the 1st"));
        assert!(describe(2).ends_with("the 2nd"));
        assert!(describe(3).ends_with("the 3rd"));
        assert!(describe(4).ends_with("the 4th"));
        assert!(describe(11).ends_with("the 11th"));
    }

    #[test]
    fn test_constructors_reject_bad_parameters() {
        assert!(Promotion::get_one_free(0).is_err());
        assert!(Promotion::package(0, Percentage::from_percent(10)).is_err());
        assert!(Promotion::package(2, Percentage::from_bps(10_001)).is_err());
        assert!(Promotion::threshold(2, Percentage::from_bps(20_000)).is_err());
    }

    #[test]
    fn test_spec_deserializes_by_kind() {
        let spec: PromotionSpec =
            serde_json::from_str(r#"{"kind": "get_one_free", "every": 3}"#).unwrap();
        assert_eq!(spec, PromotionSpec::GetOneFree { every: 3 });

        let spec: PromotionSpec =
            serde_json::from_str(r#"{"kind": "package", "size": 4, "percent": 20}"#).unwrap();
        assert_eq!(
            spec.resolve().unwrap(),
            Promotion::Package {
                size: 4,
                rate: Percentage::from_percent(20)
            }
        );

        let spec: PromotionSpec =
            serde_json::from_str(r#"{"kind": "threshold", "count": 2, "percent": 50}"#).unwrap();
        assert_eq!(
            spec.resolve().unwrap().description().unwrap(),
            "50% off of every after the 2nd"
        );
    }

    #[test]
    fn test_unrecognized_spec_resolves_to_none() {
        let spec: PromotionSpec = serde_json::from_str(r#"{"kind": "mystery"}"#).unwrap();
        assert_eq!(spec, PromotionSpec::None);
        assert_eq!(spec.resolve().unwrap(), Promotion::None);
        assert_eq!(PromotionSpec::default().resolve().unwrap(), Promotion::None);
    }

    #[test]
    fn test_absent_kind_resolves_to_none() {
        for json in ["{}", r#"{"every": 3}"#, r#"{"kind": null, "size": 2}"#, "null"] {
            let spec: PromotionSpec = serde_json::from_str(json).unwrap();
            assert_eq!(spec, PromotionSpec::None, "{json}");
        }
    }

    #[test]
    fn test_known_kind_requires_its_parameters() {
        let err = serde_json::from_str::<PromotionSpec>(r#"{"kind": "package", "size": 3}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing field `percent`"));
        assert!(serde_json::from_str::<PromotionSpec>(r#"{"kind": "get_one_free"}"#).is_err());
    }

    #[test]
    fn test_spec_rejects_out_of_range_percent() {
        let spec = PromotionSpec::Threshold {
            count: 1,
            percent: 150,
        };
        assert!(matches!(
            spec.resolve(),
            Err(ValidationError::OutOfRange { max: 100, .. })
        ));
    }
}

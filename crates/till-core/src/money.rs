//! # Money Module
//!
//! Provides the `Money` type for monetary values and the `Percentage` type
//! used by promotions and coupons.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 15% package discount on 3 × $1.11:                                   │
//! │    float:  0.49949999999999994 → prints 0.50 or 0.49 depending on path  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                             │
//! │    333 cents × 1500 bps = 499500 → (499500 + 5000) / 10000 = 50 cents   │
//! │    Rounded exactly once, the same way every time                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::{Money, Percentage};
//!
//! let price: Money = "10.99".parse().unwrap();
//! assert_eq!(price.cents(), 1099);
//!
//! let line = price * 3;                                   // $32.97
//! let off = line.percentage_of(Percentage::from_percent(10)); // $3.30
//! assert_eq!(off.cents(), 330);
//! assert_eq!((line - off).to_plain_string(), "29.67");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences such as `subtotal - discount` stay exact
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No serde derive**: wire input goes through [`decimal`], output uses `cents()`
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.unit_price ──┬──► unit × qty ──► − promotion ──► subtotal      │
/// │                       │                                     │           │
/// │                       │                                     ▼           │
/// │                       │                         − coupon ──► total      │
/// │                       │                                                 │
/// │                       └──► "%9.2f" columns on the invoice               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns `rate` of this amount, rounded half away from zero to the cent.
    ///
    /// ## Implementation
    /// `(cents × bps ± 5000) / 10000` in i128, so the only rounding step is
    /// the final division.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::{Money, Percentage};
    ///
    /// let amount = Money::from_cents(333);
    /// let part = amount.percentage_of(Percentage::from_percent(15));
    /// // 3.33 × 15% = 0.4995 → 0.50
    /// assert_eq!(part.cents(), 50);
    /// ```
    pub fn percentage_of(&self, rate: Percentage) -> Money {
        let scaled = self.0 as i128 * rate.bps() as i128;
        let rounded = if scaled >= 0 {
            (scaled + 5000) / 10000
        } else {
            (scaled - 5000) / 10000
        };
        Money::from_cents(rounded as i64)
    }

    /// Formats as a plain two-decimal number without a currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1250).to_plain_string(), "12.50");
    /// assert_eq!(Money::from_cents(-50).to_plain_string(), "-0.50");
    /// ```
    pub fn to_plain_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

/// Display shows money with a dollar sign (`$10.99`).
///
/// ## Note
/// Used in error messages and logs. The invoice uses
/// [`Money::to_plain_string`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Parses decimal text such as `"12"`, `"12.5"` or `"0.01"`.
///
/// ## Rules
/// - Optional leading `-`
/// - Digits, optionally followed by `.` and at most two fractional digits
/// - No exponent, no thousands separators, no currency symbol
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("'{}' {}", text, reason),
        };

        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (major, minor) = digits.split_once('.').unwrap_or((digits, ""));

        if major.is_empty() && minor.is_empty() {
            return Err(invalid("is not a decimal number"));
        }
        if !major.bytes().all(|b| b.is_ascii_digit()) || !minor.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("is not a decimal number"));
        }
        if minor.len() > 2 {
            return Err(invalid("has more than two decimal places"));
        }

        let major_value: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid("is too large"))?
        };
        let minor_value: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("is not a decimal number"))? * 10,
            _ => minor.parse().map_err(|_| invalid("is not a decimal number"))?,
        };

        let cents = major_value
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor_value))
            .ok_or_else(|| invalid("is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Decimal Serde Helper
// =============================================================================

/// Deserializes [`Money`] from decimal text or a JSON number.
///
/// Numbers are converted through their decimal text (`3.5` → `"3.5"`), so
/// no float arithmetic touches the amount. This relies on serde_json's
/// `arbitrary_precision` feature, which keeps the number exactly as written;
/// `10.999999999999999999` is rejected instead of becoming `11.00`.
///
/// Only call this from a non-buffering deserializer (plain structs). Tagged
/// or untagged enums buffer their content and lose the number text.
///
/// ## Usage
/// ```rust
/// use serde::Deserialize;
/// use till_core::money::{self, Money};
///
/// #[derive(Deserialize)]
/// struct Entry {
///     #[serde(deserialize_with = "money::decimal::deserialize")]
///     price: Money,
/// }
///
/// let entry: Entry = serde_json::from_str(r#"{"price": 3.5}"#).unwrap();
/// assert_eq!(entry.price.cents(), 350);
/// ```
pub mod decimal {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::Money;
    use crate::error::ValidationError;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        from_json(&value).map_err(serde::de::Error::custom)
    }

    /// Parses an already-decoded JSON string or number.
    pub fn from_json(value: &Value) -> Result<Money, ValidationError> {
        match value {
            Value::String(text) => text.parse(),
            Value::Number(number) => number.to_string().parse(),
            _ => Err(ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: "expected a decimal string or number".to_string(),
            }),
        }
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10%, 1250 bps = 12.5%
///
/// Whole percents cover every promotion in practice; basis points keep
/// fractional ones exact as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(u32);

impl Percentage {
    /// 100%.
    pub const FULL: Percentage = Percentage(10_000);

    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from whole percents.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        Percentage(percent.saturating_mul(100))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

/// Prints the rate in percent without trailing zeros: `10`, `12.5`, `0.25`.
impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        if fraction == 0 {
            write!(f, "{}", whole)
        } else if fraction % 10 == 0 {
            write!(f, "{}.{}", whole, fraction / 10)
        } else {
            write!(f, "{}.{:02}", whole, fraction)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

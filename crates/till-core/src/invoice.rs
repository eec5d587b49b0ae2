//! # Invoice Rendering
//!
//! Turns a cart into the fixed-width text table printed at checkout.
//!
//! ## Layout
//! ```text
//! +------------------------------------------------+----------+
//! | Name                                       qty |    price |
//! +------------------------------------------------+----------+
//! | Green Tea                                    8 |     6.32 |
//! |   (buy 2, get 1 free)                          |    -1.58 |
//! | Coupon TEATIME - 20% off                       |    -0.95 |
//! +------------------------------------------------+----------+
//! | TOTAL                                          |     3.79 |
//! +------------------------------------------------+----------+
//! ```
//!
//! Every row is 61 characters plus `\n`. Existing consumers parse this text
//! by column, so the widths below are fixed:
//! - name: 44 columns, left aligned
//! - quantity: 2 columns, right aligned
//! - discount description: 47 columns, left aligned
//! - amounts: 9 columns, right aligned, two decimals, `-` on discounts

use crate::cart::{Cart, CartLine};
use crate::coupon::Coupon;
use crate::money::Money;

const RULE: &str = "+------------------------------------------------+----------+\n";
const HEADER: &str = "| Name                                       qty |    price |\n";

/// Renders the invoice for `cart`.
///
/// Pure: reads the cart and returns text, so rendering an unchanged cart
/// twice yields identical output.
pub fn render(cart: &Cart<'_>) -> String {
    let mut out = String::with_capacity(62 * (6 + 2 * cart.lines().count()));

    out.push_str(RULE);
    out.push_str(HEADER);
    out.push_str(RULE);

    for line in cart.lines() {
        push_product_row(&mut out, line);
    }

    if let Some(coupon) = cart.coupon() {
        push_coupon_row(&mut out, coupon, cart.total_without_coupon());
    }

    out.push_str(RULE);
    out.push_str(&format!(
        "| {:<46} |{:>9} |\n",
        "TOTAL",
        cart.total().to_plain_string()
    ));
    out.push_str(RULE);
    out
}

/// Product row, followed by its promotion row when the promotion saves
/// anything on this line.
fn push_product_row(out: &mut String, line: &CartLine<'_>) {
    out.push_str(&format!(
        "| {:<44.44}{:>2} |{:>9} |\n",
        line.product.name(),
        line.quantity,
        line.gross().to_plain_string()
    ));

    let discount = line.discount();
    if discount.is_zero() {
        return;
    }
    if let Some(description) = line.product.promotion().description() {
        push_discount_row(out, &format!("  ({})", description), discount);
    }
}

fn push_coupon_row(out: &mut String, coupon: &Coupon, subtotal: Money) {
    let label = format!("Coupon {} {}", coupon.name(), coupon.description());
    push_discount_row(out, &label, coupon.discount(subtotal));
}

fn push_discount_row(out: &mut String, label: &str, discount: Money) {
    out.push_str(&format!(
        "| {:<47.47}|{:>9} |\n",
        label,
        format!("-{}", discount.to_plain_string())
    ));
}

// =============================================================================
// Unit Tests
// =============================================================================

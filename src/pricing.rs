//! Pricing
//!
//! Totals are kept as exact decimals. Rounding to two places only happens when a value is
//! formatted for display.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Money,
    iso::{Currency, INR},
};

use crate::{cart::CartLine, products::Product};

/// Sum of `quantity x price` over the given lines.
pub fn subtotal<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> Money<'static, Currency> {
    let amount = lines.into_iter().fold(Decimal::ZERO, |acc, line| {
        acc.saturating_add(line.product().line_price(line.quantity()))
    });

    Money::from_decimal(amount, INR)
}

/// The amount taken off `subtotal` by `rate`.
pub fn discount_amount(
    subtotal: &Money<'static, Currency>,
    rate: Percentage,
) -> Money<'static, Currency> {
    let amount = subtotal.amount().saturating_mul(rate * Decimal::ONE);

    Money::from_decimal(amount, subtotal.currency())
}

/// `subtotal x (1 - rate)`.
pub fn discounted_total(
    subtotal: &Money<'static, Currency>,
    rate: Percentage,
) -> Money<'static, Currency> {
    let keep = Decimal::ONE - (rate * Decimal::ONE);
    let amount = subtotal.amount().saturating_mul(keep);

    Money::from_decimal(amount, subtotal.currency())
}

/// Rounds an amount half away from zero to two decimal places.
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats money as `₹1234.50`.
pub fn format_money(money: &Money<'_, Currency>) -> String {
    format!(
        "{}{:.2}",
        money.currency().symbol,
        round_for_display(*money.amount())
    )
}

/// Formats a unit price for a product listing.
pub fn format_price(product: &Product) -> String {
    format_money(&product.price)
}

/// Whole percentage points of a rate, e.g. `10` for 10%.
pub fn percent_points(rate: Percentage) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}

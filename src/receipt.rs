//! Receipt
//!
//! The order confirmation produced when checkout succeeds, and its printed summary.

use std::io;

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    cart::{Cart, CartLine},
    checkout::PaymentMethod,
    pricing::{format_money, percent_points},
};

/// Errors that can occur when printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Writing to the output failed.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// A placed order
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    order_id: Uuid,
    lines: Vec<CartLine>,
    promo_code: Option<&'static str>,
    discount_rate: Percentage,
    subtotal: Money<'static, Currency>,
    discount: Money<'static, Currency>,
    total: Money<'static, Currency>,
    shipping_address: String,
    payment_method: PaymentMethod,
}

impl OrderConfirmation {
    /// Captures the order as it stood in `cart` at the moment of confirmation.
    pub fn new(cart: &Cart, shipping_address: String, payment_method: PaymentMethod) -> Self {
        Self {
            order_id: Uuid::now_v7(),
            lines: cart.lines().to_vec(),
            promo_code: cart.promos().lookup(cart.promo_code()).map(|promo| promo.code()),
            discount_rate: cart.discount_rate(),
            subtotal: cart.total_price(),
            discount: cart.discount_amount(),
            total: cart.discounted_total(),
            shipping_address,
            payment_method,
        }
    }

    /// Order id
    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    /// Lines ordered
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The recognised promo code used, if any.
    pub fn promo_code(&self) -> Option<&'static str> {
        self.promo_code
    }

    /// Discount rate applied
    pub fn discount_rate(&self) -> Percentage {
        self.discount_rate
    }

    /// Total before discount
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Amount taken off by the promo code
    pub fn discount(&self) -> Money<'static, Currency> {
        self.discount
    }

    /// Amount payable
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Shipping address
    pub fn shipping_address(&self) -> &str {
        &self.shipping_address
    }

    /// Payment method
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Prints the order summary.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Price", "Line Total"]);

        for line in &self.lines {
            builder.push_record([
                line.product().title.clone(),
                format!("x{}", line.quantity()),
                format_money(&line.product().price),
                format_money(&line.total()),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "Order {}", self.order_id)?;
        writeln!(out, "{table}")?;

        let mut summary = vec![("Total:", format_money(&self.subtotal))];

        if let Some(code) = self.promo_code.filter(|_| !self.discount.is_zero()) {
            summary.push((
                "Discount:",
                format!(
                    "-{} ({}% {code})",
                    format_money(&self.discount),
                    percent_points(self.discount_rate)
                ),
            ));
        }

        summary.push(("Final:", format_money(&self.total)));

        let label_width = summary
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or_default();

        for (label, value) in summary {
            writeln!(out, "{label:>label_width$} {value}")?;
        }

        writeln!(out, "Ship to: {}", self.shipping_address)?;
        writeln!(out, "Payment: {}", self.payment_method)?;

        Ok(())
    }
}

//! Cart
//!
//! The cart owns its lines, the promo code the customer entered and the checkout state
//! machine. Totals and the discount rate are derived on every read.

use std::{
    num::NonZeroU32,
    time::{Duration, Instant},
};

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    checkout::{Checkout, CheckoutError, CheckoutPhase, PaymentMethod},
    pricing,
    products::{Product, ProductId},
    promotions::{PromoBook, PromoOutcome},
    receipt::OrderConfirmation,
};

mod line;

pub use line::CartLine;

/// Errors for cart operations that name a line.
///
/// The cart is left untouched whenever one of these is returned, so callers that only
/// care about the "never crash on a stale reference" behaviour may ignore them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    /// No line exists for the product.
    #[error("product {0} is not in the cart")]
    LineNotFound(ProductId),
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    promo_code: String,
    promos: PromoBook,
    checkout: Checkout,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(PromoBook::default())
    }
}

impl Cart {
    /// An empty cart recognising the given promo codes.
    pub fn new(promos: PromoBook) -> Self {
        Self {
            lines: Vec::new(),
            promo_code: String::new(),
            promos,
            checkout: Checkout::default(),
        }
    }

    /// Sets how long an order confirmation stays visible.
    #[must_use]
    pub fn with_confirmation_display(mut self, display_for: Duration) -> Self {
        self.checkout = Checkout::new(display_for);
        self
    }

    /// Rebuilds a cart from `(product, quantity)` pairs, in order.
    ///
    /// Repeated products are merged and zero quantities are dropped.
    pub fn with_lines(
        promos: PromoBook,
        lines: impl IntoIterator<Item = (Product, u32)>,
    ) -> Self {
        let mut cart = Self::new(promos);

        for (product, quantity) in lines {
            let Some(quantity) = NonZeroU32::new(quantity) else {
                continue;
            };

            match cart.position(product.id) {
                Some(idx) => {
                    if let Some(line) = cart.lines.get_mut(idx) {
                        let merged = quantity.saturating_add(line.quantity());
                        line.set_quantity(merged);
                    }
                }
                None => cart.lines.push(CartLine::new(product, quantity)),
            }
        }

        cart
    }

    fn position(&self, product: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product_id() == product)
    }

    /// Adds one unit of `product`, appending a new line if it is not yet in the cart.
    ///
    /// Returns the line's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        let quantity = match self.lines.iter_mut().find(|line| line.product_id() == product.id) {
            Some(line) => line.increment(),
            None => {
                self.lines
                    .push(CartLine::new(product.clone(), NonZeroU32::MIN));
                1
            }
        };

        debug!(product = %product.id, quantity, "added to cart");

        quantity
    }

    /// Sets a line's quantity to `max(0, quantity)`, removing the line at zero.
    ///
    /// Returns the new quantity (zero when the line was removed).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn update_quantity(&mut self, product: ProductId, quantity: i64) -> Result<u32, CartError> {
        let idx = self
            .position(product)
            .ok_or(CartError::LineNotFound(product))?;

        let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);

        match NonZeroU32::new(clamped) {
            Some(quantity) => {
                if let Some(line) = self.lines.get_mut(idx) {
                    line.set_quantity(quantity);
                }
            }
            None => {
                self.lines.remove(idx);
            }
        }

        debug!(product = %product, quantity = clamped, "cart quantity updated");

        Ok(clamped)
    }

    /// Removes a product's line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn remove(&mut self, product: ProductId) -> Result<CartLine, CartError> {
        let idx = self
            .position(product)
            .ok_or(CartError::LineNotFound(product))?;

        debug!(product = %product, "removed from cart");

        Ok(self.lines.remove(idx))
    }

    /// Empties the cart and drops any promo code.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.promo_code.clear();
    }

    /// Applies a promo code. Unrecognised codes replace any previous code and remove the
    /// discount.
    pub fn apply_promo(&mut self, input: &str) -> PromoOutcome {
        self.promo_code = input.trim().to_string();

        match self.promos.lookup(input) {
            Some(promo) => {
                debug!(code = promo.code(), "promo applied");
                PromoOutcome::Applied {
                    code: promo.code(),
                    rate: promo.rate(),
                }
            }
            None => {
                debug!(code = %self.promo_code, "promo rejected");
                PromoOutcome::Rejected {
                    input: self.promo_code.clone(),
                }
            }
        }
    }

    /// The promo code as last entered, possibly empty.
    pub fn promo_code(&self) -> &str {
        &self.promo_code
    }

    /// The recognised promo codes.
    pub fn promos(&self) -> &PromoBook {
        &self.promos
    }

    /// Discount rate implied by the current promo code.
    pub fn discount_rate(&self) -> Percentage {
        self.promos.rate_for(&self.promo_code)
    }

    /// Whether the current promo code grants a discount.
    pub fn has_discount(&self) -> bool {
        self.promos.lookup(&self.promo_code).is_some()
    }

    /// Sum of `quantity x price` over every line.
    pub fn total_price(&self) -> Money<'static, Currency> {
        pricing::subtotal(&self.lines)
    }

    /// The amount the current discount takes off [`Cart::total_price`].
    pub fn discount_amount(&self) -> Money<'static, Currency> {
        pricing::discount_amount(&self.total_price(), self.discount_rate())
    }

    /// [`Cart::total_price`] with the discount applied.
    pub fn discounted_total(&self) -> Money<'static, Currency> {
        pricing::discounted_total(&self.total_price(), self.discount_rate())
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// The line for a product.
    pub fn line(&self, product: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product)
    }

    /// Units of a product in the cart; zero when absent.
    pub fn quantity(&self, product: ProductId) -> u32 {
        self.line(product).map_or(0, CartLine::quantity)
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Checkout state
    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Current checkout phase
    pub fn checkout_phase(&self) -> CheckoutPhase {
        self.checkout.phase()
    }

    /// Opens the order summary.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: there is nothing to check out.
    /// - [`CheckoutError::WrongPhase`]: checkout is not idle.
    pub fn begin_checkout(&mut self) -> Result<(), CheckoutError> {
        if self.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.checkout.begin()
    }

    /// Closes the order summary without placing the order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongPhase`] unless checkout is reviewing.
    pub fn cancel_checkout(&mut self) -> Result<(), CheckoutError> {
        self.checkout.cancel()
    }

    /// Records the shipping address.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongPhase`] unless checkout is reviewing.
    pub fn set_shipping_address(&mut self, address: impl Into<String>) -> Result<(), CheckoutError> {
        self.checkout.set_shipping_address(address.into())
    }

    /// Records the payment method.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongPhase`] unless checkout is reviewing.
    pub fn select_payment_method(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.checkout.select_payment_method(method)
    }

    /// Places the order.
    ///
    /// On success the cart, promo code and checkout form are cleared in a single assignment
    /// and checkout moves to [`CheckoutPhase::Confirmed`]. On a validation failure checkout
    /// stays in [`CheckoutPhase::Reviewing`] with a message for the customer.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::WrongPhase`]: checkout is not reviewing.
    /// - [`CheckoutError::EmptyCart`]: the cart was emptied while reviewing.
    /// - [`CheckoutError::MissingShippingAddress`] / [`CheckoutError::MissingPaymentMethod`]:
    ///   the form is incomplete.
    pub fn confirm_order(&mut self, now: Instant) -> Result<OrderConfirmation, CheckoutError> {
        let (address, payment) = self.checkout.prepare_confirmation(self.is_empty())?;

        let cleared = Cart {
            lines: Vec::new(),
            promo_code: String::new(),
            promos: self.promos.clone(),
            checkout: self.checkout.confirmed(now),
        };

        let placed = std::mem::replace(self, cleared);
        let confirmation = OrderConfirmation::new(&placed, address, payment);

        debug!(order = %confirmation.order_id(), "order confirmed");

        Ok(confirmation)
    }

    /// Lets a shown confirmation lapse back to idle once its display interval has passed.
    ///
    /// Returns `true` if the phase changed.
    pub fn expire_confirmation(&mut self, now: Instant) -> bool {
        self.checkout.expire_confirmation(now)
    }

    /// Dismisses a shown confirmation immediately.
    pub fn dismiss_confirmation(&mut self) {
        self.checkout.dismiss_confirmation();
    }
}

//! Checkout
//!
//! `Idle -> Reviewing -> Confirmed -> Idle`. Confirmation is shown for a display interval and
//! then lapses back to idle; time is passed in by the caller, the engine owns no timers.

use std::{
    fmt,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// How long a confirmed order stays on screen before checkout returns to idle.
pub const DEFAULT_CONFIRMATION_DISPLAY: Duration = Duration::from_secs(2);

/// Accepted payment methods.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Card payment
    CreditCard,

    /// Pay the courier on delivery
    CashOnDelivery,
}

impl PaymentMethod {
    /// Every method, in the order they are offered.
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::CreditCard, PaymentMethod::CashOnDelivery];

    /// Label shown to the customer.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checkout phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutPhase {
    /// Browsing the cart
    Idle,

    /// Order summary open, collecting address and payment
    Reviewing,

    /// Order placed, thank-you shown
    Confirmed,
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckoutPhase::Idle => "idle",
            CheckoutPhase::Reviewing => "reviewing",
            CheckoutPhase::Confirmed => "confirmed",
        })
    }
}

/// Checkout validation and transition errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout was started or confirmed with nothing in the cart.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// The operation is not valid in the current phase.
    #[error("checkout is {current}, expected {expected}")]
    WrongPhase {
        /// Phase the checkout is in
        current: CheckoutPhase,

        /// Phase the operation requires
        expected: CheckoutPhase,
    },

    /// No shipping address was entered.
    #[error("Please enter your shipping address.")]
    MissingShippingAddress,

    /// No payment method was selected.
    #[error("Please select a payment method.")]
    MissingPaymentMethod,
}

/// Details collected while reviewing an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Free-text shipping address
    pub shipping_address: String,

    /// Selected payment method
    pub payment_method: Option<PaymentMethod>,
}

impl CheckoutForm {
    /// Validates the form, returning the trimmed address and the payment method.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::MissingShippingAddress`]: the address is blank.
    /// - [`CheckoutError::MissingPaymentMethod`]: no payment method is selected.
    pub fn validate(&self) -> Result<(String, PaymentMethod), CheckoutError> {
        let address = self.shipping_address.trim();

        if address.is_empty() {
            return Err(CheckoutError::MissingShippingAddress);
        }

        let payment = self
            .payment_method
            .ok_or(CheckoutError::MissingPaymentMethod)?;

        Ok((address.to_string(), payment))
    }
}

/// Checkout state machine
#[derive(Debug, Clone)]
pub struct Checkout {
    phase: CheckoutPhase,
    form: CheckoutForm,
    message: Option<String>,
    confirmed_at: Option<Instant>,
    display_for: Duration,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRMATION_DISPLAY)
    }
}

impl Checkout {
    /// Idle checkout that shows confirmations for `display_for`.
    pub fn new(display_for: Duration) -> Self {
        Self {
            phase: CheckoutPhase::Idle,
            form: CheckoutForm::default(),
            message: None,
            confirmed_at: None,
            display_for,
        }
    }

    /// Current phase
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Form contents
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// The last validation message, if the previous confirmation attempt failed.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// How long confirmations stay visible.
    pub fn display_for(&self) -> Duration {
        self.display_for
    }

    fn require(&self, expected: CheckoutPhase) -> Result<(), CheckoutError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(CheckoutError::WrongPhase {
                current: self.phase,
                expected,
            })
        }
    }

    pub(crate) fn begin(&mut self) -> Result<(), CheckoutError> {
        self.require(CheckoutPhase::Idle)?;

        debug!("checkout reviewing");
        self.phase = CheckoutPhase::Reviewing;

        Ok(())
    }

    pub(crate) fn cancel(&mut self) -> Result<(), CheckoutError> {
        self.require(CheckoutPhase::Reviewing)?;

        debug!("checkout cancelled");
        self.phase = CheckoutPhase::Idle;
        self.message = None;

        Ok(())
    }

    pub(crate) fn set_shipping_address(&mut self, address: String) -> Result<(), CheckoutError> {
        self.require(CheckoutPhase::Reviewing)?;
        self.form.shipping_address = address;

        Ok(())
    }

    pub(crate) fn select_payment_method(
        &mut self,
        method: PaymentMethod,
    ) -> Result<(), CheckoutError> {
        self.require(CheckoutPhase::Reviewing)?;
        self.form.payment_method = Some(method);

        Ok(())
    }

    /// Checks the phase and form ahead of a confirmation, recording the message on failure.
    pub(crate) fn prepare_confirmation(
        &mut self,
        cart_is_empty: bool,
    ) -> Result<(String, PaymentMethod), CheckoutError> {
        self.require(CheckoutPhase::Reviewing)?;

        let validated = if cart_is_empty {
            Err(CheckoutError::EmptyCart)
        } else {
            self.form.validate()
        };

        validated.inspect_err(|error| {
            debug!(%error, "order confirmation rejected");
            self.message = Some(error.to_string());
        })
    }

    /// The state a successful confirmation moves to: confirmed, with an empty form.
    pub(crate) fn confirmed(&self, now: Instant) -> Self {
        Self {
            phase: CheckoutPhase::Confirmed,
            form: CheckoutForm::default(),
            message: None,
            confirmed_at: Some(now),
            display_for: self.display_for,
        }
    }

    /// Returns to idle once the confirmation has been shown for the display interval.
    ///
    /// Returns `true` if the phase changed.
    pub fn expire_confirmation(&mut self, now: Instant) -> bool {
        let lapsed = self
            .confirmed_at
            .is_some_and(|at| now.saturating_duration_since(at) >= self.display_for);

        if self.phase == CheckoutPhase::Confirmed && lapsed {
            self.dismiss_confirmation();
            true
        } else {
            false
        }
    }

    /// Returns to idle immediately from a confirmation.
    pub fn dismiss_confirmation(&mut self) {
        if self.phase == CheckoutPhase::Confirmed {
            debug!("checkout idle");
            self.phase = CheckoutPhase::Idle;
            self.confirmed_at = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn reviewing() -> TestResult<Checkout> {
        let mut checkout = Checkout::default();
        checkout.begin()?;

        Ok(checkout)
    }

    #[test]
    fn form_requires_address_before_payment() {
        let form = CheckoutForm::default();

        assert_eq!(form.validate(), Err(CheckoutError::MissingShippingAddress));
    }

    #[test]
    fn blank_address_is_missing() {
        let form = CheckoutForm {
            shipping_address: "   \n".to_string(),
            payment_method: Some(PaymentMethod::CreditCard),
        };

        assert_eq!(form.validate(), Err(CheckoutError::MissingShippingAddress));
    }

    #[test]
    fn form_requires_payment_method() {
        let form = CheckoutForm {
            shipping_address: "12 Marine Drive, Mumbai".to_string(),
            payment_method: None,
        };

        assert_eq!(form.validate(), Err(CheckoutError::MissingPaymentMethod));
    }

    #[test]
    fn valid_form_trims_address() {
        let form = CheckoutForm {
            shipping_address: "  12 Marine Drive  ".to_string(),
            payment_method: Some(PaymentMethod::CashOnDelivery),
        };

        assert_eq!(
            form.validate(),
            Ok((
                "12 Marine Drive".to_string(),
                PaymentMethod::CashOnDelivery
            ))
        );
    }

    #[test]
    fn begin_only_from_idle() -> TestResult {
        let mut checkout = reviewing()?;

        assert_eq!(
            checkout.begin(),
            Err(CheckoutError::WrongPhase {
                current: CheckoutPhase::Reviewing,
                expected: CheckoutPhase::Idle,
            })
        );

        Ok(())
    }

    #[test]
    fn cancel_clears_message_and_keeps_form() -> TestResult {
        let mut checkout = reviewing()?;
        checkout.set_shipping_address("Eden Gardens".to_string())?;

        assert!(checkout.prepare_confirmation(false).is_err());
        assert!(checkout.message().is_some());

        checkout.cancel()?;

        assert_eq!(checkout.phase(), CheckoutPhase::Idle);
        assert_eq!(checkout.message(), None);
        assert_eq!(checkout.form().shipping_address, "Eden Gardens");

        Ok(())
    }

    #[test]
    fn form_edits_require_reviewing() {
        let mut checkout = Checkout::default();

        assert!(matches!(
            checkout.select_payment_method(PaymentMethod::CreditCard),
            Err(CheckoutError::WrongPhase { .. })
        ));
        assert_eq!(checkout.form().payment_method, None);
    }

    #[test]
    fn failed_confirmation_records_message() -> TestResult {
        let mut checkout = reviewing()?;

        let result = checkout.prepare_confirmation(false);

        assert_eq!(result, Err(CheckoutError::MissingShippingAddress));
        assert_eq!(checkout.phase(), CheckoutPhase::Reviewing);
        assert_eq!(
            checkout.message(),
            Some("Please enter your shipping address.")
        );

        Ok(())
    }

    #[test]
    fn empty_cart_fails_confirmation() -> TestResult {
        let mut checkout = reviewing()?;
        checkout.set_shipping_address("Lord's".to_string())?;
        checkout.select_payment_method(PaymentMethod::CreditCard)?;

        assert_eq!(
            checkout.prepare_confirmation(true),
            Err(CheckoutError::EmptyCart)
        );

        Ok(())
    }

    #[test]
    fn confirmation_lapses_after_display_interval() {
        let start = Instant::now();
        let mut checkout = Checkout::new(Duration::from_millis(500)).confirmed(start);

        assert!(!checkout.expire_confirmation(start + Duration::from_millis(499)));
        assert_eq!(checkout.phase(), CheckoutPhase::Confirmed);

        assert!(checkout.expire_confirmation(start + Duration::from_millis(500)));
        assert_eq!(checkout.phase(), CheckoutPhase::Idle);
    }

    #[test]
    fn expire_is_a_no_op_outside_confirmed() {
        let mut checkout = Checkout::default();

        assert!(!checkout.expire_confirmation(Instant::now()));
        assert_eq!(checkout.phase(), CheckoutPhase::Idle);
    }

    #[test]
    fn payment_labels() {
        assert_eq!(PaymentMethod::CreditCard.to_string(), "Credit Card");
        assert_eq!(PaymentMethod::CashOnDelivery.to_string(), "Cash on Delivery");
    }
}

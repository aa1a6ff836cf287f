//! Promotions
//!
//! A promo code deterministically maps to a discount rate. An unrecognised code is a
//! "no discount" outcome rather than an error.

use decimal_percentage::Percentage;

/// The storefront's ten percent code.
pub const SAVE10: &str = "SAVE10";

/// Rate applied when no recognised code is active.
pub fn no_discount() -> Percentage {
    Percentage::from(0.0)
}

/// A recognised promo code and the rate it grants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromoCode {
    code: &'static str,
    rate: Percentage,
}

impl PromoCode {
    /// Creates a promo code. `code` is matched case-insensitively, so store it upper-case.
    pub fn new(code: &'static str, rate: Percentage) -> Self {
        Self { code, rate }
    }

    /// The canonical (upper-case) code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// The discount rate granted by this code.
    pub fn rate(&self) -> Percentage {
        self.rate
    }
}

/// The set of codes the storefront recognises.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoBook {
    codes: Vec<PromoCode>,
}

impl Default for PromoBook {
    fn default() -> Self {
        Self {
            codes: vec![PromoCode::new(SAVE10, Percentage::from(0.1))],
        }
    }
}

impl PromoBook {
    /// A book with the given codes.
    pub fn with_codes(codes: impl Into<Vec<PromoCode>>) -> Self {
        Self {
            codes: codes.into(),
        }
    }

    /// Finds the code matching `input` after trimming whitespace and ignoring case.
    pub fn lookup(&self, input: &str) -> Option<&PromoCode> {
        let wanted = input.trim();

        self.codes
            .iter()
            .find(|promo| promo.code.eq_ignore_ascii_case(wanted))
    }

    /// The rate `input` maps to; zero for anything unrecognised.
    pub fn rate_for(&self, input: &str) -> Percentage {
        self.lookup(input).map_or_else(no_discount, PromoCode::rate)
    }
}

/// Result of applying a promo code to a cart.
#[derive(Debug, Clone, PartialEq)]
pub enum PromoOutcome {
    /// The code was recognised and its rate now applies.
    Applied {
        /// Canonical code
        code: &'static str,

        /// Rate now in effect
        rate: Percentage,
    },

    /// The code was not recognised; no discount applies.
    Rejected {
        /// The code as entered
        input: String,
    },
}

impl PromoOutcome {
    /// Whether a discount is now in effect.
    pub fn is_applied(&self) -> bool {
        matches!(self, PromoOutcome::Applied { .. })
    }
}

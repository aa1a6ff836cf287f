//! Cart lines

use std::num::NonZeroU32;

use rusty_money::{
    Money,
    iso::{Currency, INR},
};

use crate::products::{Product, ProductId};

/// One product in the cart and how many of it.
///
/// A line always holds at least one unit; dropping to zero removes it from the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Product,
    quantity: NonZeroU32,
}

impl CartLine {
    /// A line holding `quantity` units of `product`.
    pub fn new(product: Product, quantity: NonZeroU32) -> Self {
        Self { product, quantity }
    }

    /// The product on this line
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The product id on this line
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Number of units
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// `quantity x unit price`
    pub fn total(&self) -> Money<'static, Currency> {
        Money::from_decimal(self.product.line_price(self.quantity()), INR)
    }

    pub(crate) fn increment(&mut self) -> u32 {
        self.quantity = self.quantity.saturating_add(1);
        self.quantity()
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::products::test_support::record;

    use super::*;

    #[test]
    fn total_multiplies_price_by_quantity() -> TestResult {
        let product = Product::try_from(record(1, "Batting Gloves", 1250, "Protection"))?;
        let line = CartLine::new(product, NonZeroU32::MIN.saturating_add(2));

        assert_eq!(line.quantity(), 3);
        assert_eq!(*line.total().amount(), Decimal::from(3750));

        Ok(())
    }

    #[test]
    fn increment_saturates() -> TestResult {
        let product = Product::try_from(record(2, "Grip", 99, "Accessories"))?;
        let mut line = CartLine::new(product, NonZeroU32::MAX);

        assert_eq!(line.increment(), u32::MAX);

        Ok(())
    }
}

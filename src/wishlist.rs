//! Wishlist

use tracing::debug;

use crate::products::{Product, ProductId};

/// Products saved for later, unique by id, in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wishlist {
    products: Vec<Product>,
}

impl Wishlist {
    /// An empty wishlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a wishlist from saved products, keeping the first of any repeated id.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut wishlist = Self::new();

        for product in products {
            wishlist.add(product);
        }

        wishlist
    }

    /// Saves a product. Returns `false` if it was already saved.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }

        debug!(product = %product.id, "wishlisted");
        self.products.push(product);

        true
    }

    /// Removes a product, returning it if it was saved.
    pub fn remove(&mut self, product: ProductId) -> Option<Product> {
        let idx = self.products.iter().position(|saved| saved.id == product)?;

        debug!(product = %product, "removed from wishlist");

        Some(self.products.remove(idx))
    }

    /// Saves the product if absent, otherwise removes it. Returns whether it is now saved.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.remove(product.id).is_some() {
            false
        } else {
            self.add(product.clone())
        }
    }

    /// Whether a product is saved.
    pub fn contains(&self, product: ProductId) -> bool {
        self.products.iter().any(|saved| saved.id == product)
    }

    /// Iterate over saved products in order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Saved products in order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of saved products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::test_support::record;

    use super::*;

    fn helmet() -> TestResult<Product> {
        Ok(Product::try_from(record(10, "Batting Helmet", 3200, "Protection"))?)
    }

    fn spikes() -> TestResult<Product> {
        Ok(Product::try_from(record(11, "Bowling Spikes", 4100, "Footwear"))?)
    }

    #[test]
    fn add_ignores_duplicates() -> TestResult {
        let mut wishlist = Wishlist::new();

        assert!(wishlist.add(helmet()?));
        assert!(!wishlist.add(helmet()?));
        assert_eq!(wishlist.len(), 1);

        Ok(())
    }

    #[test]
    fn toggle_adds_then_removes() -> TestResult {
        let mut wishlist = Wishlist::new();
        let helmet = helmet()?;

        assert!(wishlist.toggle(&helmet));
        assert!(wishlist.contains(helmet.id));

        assert!(!wishlist.toggle(&helmet));
        assert!(wishlist.is_empty());

        Ok(())
    }

    #[test]
    fn remove_missing_returns_none() -> TestResult {
        let mut wishlist = Wishlist::with_products([helmet()?]);

        assert_eq!(wishlist.remove(ProductId::new(404)), None);
        assert_eq!(wishlist.len(), 1);

        Ok(())
    }

    #[test]
    fn keeps_insertion_order() -> TestResult {
        let wishlist = Wishlist::with_products([spikes()?, helmet()?, spikes()?]);

        let ids: Vec<u64> = wishlist.iter().map(|product| product.id.get()).collect();

        assert_eq!(ids, vec![11, 10]);

        Ok(())
    }
}

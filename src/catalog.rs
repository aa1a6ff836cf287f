//! Catalog
//!
//! The product list the storefront sells from, loaded from a YAML fixture.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::products::{Product, ProductError, ProductId, ProductRecord};

/// Category name that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// The catalog shipped with the crate.
pub const BUILTIN_CATALOG: &str = include_str!("../fixtures/products/cricket.yml");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product record was invalid
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in display order
    pub products: Vec<ProductRecord>,
}

/// Catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog from products in display order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for product in products {
            if catalog.index.contains_key(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }

            catalog.index.insert(product.id, catalog.products.len());
            catalog.products.push(product);
        }

        Ok(catalog)
    }

    /// Parses a catalog fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a product is invalid, or ids repeat.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Self::with_products(products)
    }

    /// Loads a catalog fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&idx| self.products.get(idx))
    }

    /// Iterate over products in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// [`ALL_CATEGORIES`] followed by each distinct category in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];

        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }

        categories
    }

    /// Products in `category` (or any, for [`ALL_CATEGORIES`]) whose title or description
    /// contains `search`, ignoring case.
    pub fn filter(&self, category: &str, search: &str) -> Vec<&Product> {
        let needle = search.to_lowercase();

        self.products
            .iter()
            .filter(|product| category == ALL_CATEGORIES || product.category == category)
            .filter(|product| {
                product.title.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::test_support::record;

    use super::*;

    fn catalog() -> TestResult<Catalog> {
        let products = [
            record(1, "English Willow Bat", 8499, "Bats"),
            record(2, "Leather Ball", 649, "Balls"),
            record(3, "Kashmir Willow Bat", 2499, "Bats"),
            record(4, "Batting Gloves", 1250, "Protection"),
        ]
        .into_iter()
        .map(Product::try_from)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Catalog::with_products(products)?)
    }

    #[test]
    fn categories_start_with_all_in_first_seen_order() -> TestResult {
        let catalog = catalog()?;

        assert_eq!(catalog.categories(), vec!["All", "Bats", "Balls", "Protection"]);

        Ok(())
    }

    #[test]
    fn filter_by_category() -> TestResult {
        let catalog = catalog()?;

        let ids: Vec<u64> = catalog
            .filter("Bats", "")
            .into_iter()
            .map(|product| product.id.get())
            .collect();

        assert_eq!(ids, vec![1, 3]);

        Ok(())
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() -> TestResult {
        let catalog = catalog()?;

        let by_title: Vec<u64> = catalog
            .filter(ALL_CATEGORIES, "WILLOW")
            .into_iter()
            .map(|product| product.id.get())
            .collect();

        let by_description = catalog.filter(ALL_CATEGORIES, "match days");

        assert_eq!(by_title, vec![1, 3]);
        assert_eq!(by_description.len(), 4);
        assert!(catalog.filter("Balls", "bat").is_empty());

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() -> TestResult {
        let products = [
            Product::try_from(record(1, "Bat", 10, "Bats"))?,
            Product::try_from(record(1, "Ball", 10, "Balls"))?,
        ];

        assert!(matches!(
            Catalog::with_products(products),
            Err(CatalogError::DuplicateProduct(id)) if id == ProductId::new(1)
        ));

        Ok(())
    }

    #[test]
    fn from_yaml_parses_products() -> TestResult {
        let yaml = r"
products:
  - id: 7
    title: Thigh Guard
    price: 899.5
    category: Protection
    rating:
      rate: 4.2
      count: 31
";

        let catalog = Catalog::from_yaml(yaml)?;
        let guard = catalog.get(ProductId::new(7)).ok_or("missing product")?;

        assert_eq!(guard.title, "Thigh Guard");
        assert_eq!(guard.description, "");
        assert_eq!(guard.rating.map(|rating| rating.count), Some(31));

        Ok(())
    }

    #[test]
    fn builtin_catalog_loads() -> TestResult {
        let catalog = Catalog::builtin()?;

        assert!(!catalog.is_empty());
        assert!(catalog.categories().len() > 2);

        Ok(())
    }
}

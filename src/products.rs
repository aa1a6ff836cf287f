//! Products

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, INR},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product Id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a product id from its catalog number.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the catalog number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Customer rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,

    /// Number of ratings
    pub count: u32,
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Product price
    pub price: Money<'static, Currency>,

    /// Product description
    pub description: String,

    /// Product category
    pub category: String,

    /// Image reference (URL or asset path)
    pub image: String,

    /// Customer rating, when the product has one
    pub rating: Option<Rating>,
}

impl Product {
    /// Price of `quantity` units of this product.
    pub fn line_price(&self, quantity: u32) -> Decimal {
        self.price.amount().saturating_mul(Decimal::from(quantity))
    }
}

/// Errors raised when converting a [`ProductRecord`] into a [`Product`].
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// The product has a negative price.
    #[error("product {0} has a negative price: {1}")]
    NegativePrice(ProductId, Decimal),

    /// The product has no title.
    #[error("product {0} has no title")]
    MissingTitle(ProductId),
}

/// Serialized product, as found in catalog fixtures and wishlist snapshots.
///
/// Prices are major currency units (rupees).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product id
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Price in major units
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product category
    pub category: String,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Customer rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ProductError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        if record.price.is_sign_negative() && !record.price.is_zero() {
            return Err(ProductError::NegativePrice(record.id, record.price));
        }

        if record.title.trim().is_empty() {
            return Err(ProductError::MissingTitle(record.id));
        }

        Ok(Product {
            id: record.id,
            title: record.title,
            price: Money::from_decimal(record.price, INR),
            description: record.description,
            category: record.category,
            image: record.image,
            rating: record.rating,
        })
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        ProductRecord {
            id: product.id,
            title: product.title.clone(),
            price: *product.price.amount(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            rating: product.rating,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rust_decimal::Decimal;

    use super::{ProductId, ProductRecord};

    /// Builds a product record priced in whole rupees.
    pub(crate) fn record(id: u64, title: &str, rupees: i64, category: &str) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Decimal::from(rupees),
            description: format!("{title} for match days"),
            category: category.to_string(),
            image: format!("https://img.example/{id}.png"),
            rating: None,
        }
    }
}

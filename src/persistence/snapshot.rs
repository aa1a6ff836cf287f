//! Snapshot encoding
//!
//! Carts are stored as `[{"productId": 1, "quantity": 2}, ...]`, resolved against the
//! catalog on load. Wishlists are stored as full product records so a saved product still
//! renders if it later leaves the catalog.

use serde::{Deserialize, Serialize};

use crate::{
    cart::Cart,
    products::{ProductId, ProductRecord},
    wishlist::Wishlist,
};

/// One stored cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRecord {
    /// Product id
    pub product_id: ProductId,

    /// Units in the cart
    pub quantity: u32,
}

/// Serializes the cart's lines.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_cart(cart: &Cart) -> Result<String, serde_json::Error> {
    let records: Vec<CartLineRecord> = cart
        .iter()
        .map(|line| CartLineRecord {
            product_id: line.product_id(),
            quantity: line.quantity(),
        })
        .collect();

    serde_json::to_string(&records)
}

/// Parses a stored cart.
///
/// # Errors
///
/// Returns an error if the snapshot is not a cart line array.
pub fn decode_cart(snapshot: &str) -> Result<Vec<CartLineRecord>, serde_json::Error> {
    serde_json::from_str(snapshot)
}

/// Serializes the wishlist's products.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_wishlist(wishlist: &Wishlist) -> Result<String, serde_json::Error> {
    let records: Vec<ProductRecord> = wishlist.iter().map(ProductRecord::from).collect();

    serde_json::to_string(&records)
}

/// Parses a stored wishlist.
///
/// # Errors
///
/// Returns an error if the snapshot is not a product record array.
pub fn decode_wishlist(snapshot: &str) -> Result<Vec<ProductRecord>, serde_json::Error> {
    serde_json::from_str(snapshot)
}

//! Shop session
//!
//! Owns the catalog, cart and wishlist for one customer session. State is hydrated from a
//! [`SnapshotStore`] once, when the session opens, and written back after every mutation.
//! Store failures never roll back in-memory state: they are logged and queued as
//! [`PersistenceWarning`]s for the caller to surface.

use std::{
    mem,
    time::{Duration, Instant},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartError},
    catalog::Catalog,
    checkout::{CheckoutError, DEFAULT_CONFIRMATION_DISPLAY, PaymentMethod},
    persistence::{
        CART_KEY, SnapshotStore, StoreError, WISHLIST_KEY,
        snapshot::{decode_cart, decode_wishlist, encode_cart, encode_wishlist},
    },
    products::{Product, ProductError, ProductId},
    promotions::{PromoBook, PromoOutcome},
    receipt::OrderConfirmation,
    wishlist::Wishlist,
};

/// Errors returned by session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The product is not in the catalog.
    #[error("unknown product {0}")]
    UnknownProduct(ProductId),

    /// Cart error
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Checkout error
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// A persistence problem that did not stop the session.
#[derive(Debug, Error)]
pub enum PersistenceWarning {
    /// A snapshot could not be read when the session opened.
    #[error("could not restore {key}: {error}")]
    LoadFailed {
        /// Snapshot key
        key: &'static str,

        /// Store error
        error: StoreError,
    },

    /// A snapshot could not be written.
    #[error("could not save {key}: {error}")]
    SaveFailed {
        /// Snapshot key
        key: &'static str,

        /// Store error
        error: StoreError,
    },

    /// A stored cart line named a product the catalog no longer has.
    #[error("dropped unknown product {product} from the saved {key}")]
    UnknownProduct {
        /// Snapshot key
        key: &'static str,

        /// Missing product
        product: ProductId,
    },

    /// A stored wishlist product could not be restored.
    #[error("dropped invalid product from the saved {key}: {error}")]
    InvalidProduct {
        /// Snapshot key
        key: &'static str,

        /// Conversion error
        error: ProductError,
    },
}

/// One customer's shopping session.
#[derive(Debug)]
pub struct ShopSession<S> {
    catalog: Catalog,
    cart: Cart,
    wishlist: Wishlist,
    store: S,
    warnings: Vec<PersistenceWarning>,
}

impl<S: SnapshotStore> ShopSession<S> {
    /// Opens a session with the default promo codes and confirmation display interval.
    pub fn open(catalog: Catalog, store: S) -> Self {
        Self::open_with(catalog, store, PromoBook::default(), DEFAULT_CONFIRMATION_DISPLAY)
    }

    /// Opens a session, restoring the saved cart and wishlist.
    ///
    /// Unreadable or malformed snapshots start that part of the session empty. Saved cart
    /// lines for products missing from the catalog are dropped.
    pub fn open_with(
        catalog: Catalog,
        store: S,
        promos: PromoBook,
        display_for: Duration,
    ) -> Self {
        let mut warnings = Vec::new();

        let cart_lines = load_snapshot(&store, CART_KEY, decode_cart, &mut warnings)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|record| match catalog.get(record.product_id) {
                Some(product) => Some((product.clone(), record.quantity)),
                None => {
                    warn!(product = %record.product_id, "saved cart line is not in the catalog");
                    warnings.push(PersistenceWarning::UnknownProduct {
                        key: CART_KEY,
                        product: record.product_id,
                    });
                    None
                }
            })
            .collect::<Vec<_>>();

        let saved_products = load_snapshot(&store, WISHLIST_KEY, decode_wishlist, &mut warnings)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|record| {
                Product::try_from(record)
                    .inspect_err(|error| {
                        warn!(%error, "saved wishlist product is invalid");
                    })
                    .map_err(|error| {
                        warnings.push(PersistenceWarning::InvalidProduct {
                            key: WISHLIST_KEY,
                            error,
                        });
                    })
                    .ok()
            })
            .collect::<Vec<_>>();

        let cart = Cart::with_lines(promos, cart_lines).with_confirmation_display(display_for);
        let wishlist = Wishlist::with_products(saved_products);

        debug!(
            cart_lines = cart.len(),
            wishlist = wishlist.len(),
            "session opened"
        );

        Self {
            catalog,
            cart,
            wishlist,
            store,
            warnings,
        }
    }

    /// Catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Wishlist
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Drains the persistence warnings raised since the last call.
    pub fn take_warnings(&mut self) -> Vec<PersistenceWarning> {
        mem::take(&mut self.warnings)
    }

    fn product(&self, id: ProductId) -> Result<&Product, SessionError> {
        self.catalog.get(id).ok_or(SessionError::UnknownProduct(id))
    }

    /// Adds one unit of a catalog product to the cart, returning the line's quantity.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownProduct`] if the product is not in the catalog.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<u32, SessionError> {
        let product = self.product(id)?.clone();
        let quantity = self.cart.add(&product);

        self.save_cart();

        Ok(quantity)
    }

    /// Sets a cart line's quantity. Zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> Result<u32, SessionError> {
        let quantity = self.cart.update_quantity(id, quantity)?;

        self.save_cart();

        Ok(quantity)
    }

    /// Removes a cart line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<(), SessionError> {
        self.cart.remove(id)?;

        self.save_cart();

        Ok(())
    }

    /// Empties the cart and drops the promo code.
    pub fn clear_cart(&mut self) {
        self.cart.clear();

        self.save_cart();
    }

    /// Applies a promo code. The code itself is not persisted.
    pub fn apply_promo(&mut self, input: &str) -> PromoOutcome {
        self.cart.apply_promo(input)
    }

    /// Saves a catalog product to the wishlist. Returns `false` if it was already saved.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownProduct`] if the product is not in the catalog.
    pub fn add_to_wishlist(&mut self, id: ProductId) -> Result<bool, SessionError> {
        let product = self.product(id)?.clone();

        let added = self.wishlist.add(product);

        if added {
            self.save_wishlist();
        }

        Ok(added)
    }

    /// Removes a product from the wishlist. Returns `false` if it was not saved.
    pub fn remove_from_wishlist(&mut self, id: ProductId) -> bool {
        let removed = self.wishlist.remove(id).is_some();

        if removed {
            self.save_wishlist();
        }

        removed
    }

    /// Saves or unsaves a product, returning whether it is now saved.
    ///
    /// A product already on the wishlist can be removed even if it has left the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownProduct`] when adding a product the catalog lacks.
    pub fn toggle_wishlist(&mut self, id: ProductId) -> Result<bool, SessionError> {
        if self.remove_from_wishlist(id) {
            return Ok(false);
        }

        self.add_to_wishlist(id)
    }

    /// Whether a product is on the wishlist.
    pub fn is_wishlisted(&self, id: ProductId) -> bool {
        self.wishlist.contains(id)
    }

    /// Opens the order summary.
    ///
    /// # Errors
    ///
    /// See [`Cart::begin_checkout`].
    pub fn begin_checkout(&mut self) -> Result<(), SessionError> {
        Ok(self.cart.begin_checkout()?)
    }

    /// Closes the order summary.
    ///
    /// # Errors
    ///
    /// See [`Cart::cancel_checkout`].
    pub fn cancel_checkout(&mut self) -> Result<(), SessionError> {
        Ok(self.cart.cancel_checkout()?)
    }

    /// Records the shipping address.
    ///
    /// # Errors
    ///
    /// See [`Cart::set_shipping_address`].
    pub fn set_shipping_address(&mut self, address: impl Into<String>) -> Result<(), SessionError> {
        Ok(self.cart.set_shipping_address(address)?)
    }

    /// Records the payment method.
    ///
    /// # Errors
    ///
    /// See [`Cart::select_payment_method`].
    pub fn select_payment_method(&mut self, method: PaymentMethod) -> Result<(), SessionError> {
        Ok(self.cart.select_payment_method(method)?)
    }

    /// Places the order and saves the now empty cart.
    ///
    /// # Errors
    ///
    /// See [`Cart::confirm_order`].
    pub fn confirm_order(&mut self, now: Instant) -> Result<OrderConfirmation, SessionError> {
        let confirmation = self.cart.confirm_order(now)?;

        self.save_cart();

        Ok(confirmation)
    }

    /// Lets a shown confirmation lapse once its display interval has passed.
    pub fn expire_confirmation(&mut self, now: Instant) -> bool {
        self.cart.expire_confirmation(now)
    }

    /// Dismisses a shown confirmation immediately.
    pub fn dismiss_confirmation(&mut self) {
        self.cart.dismiss_confirmation();
    }

    fn save_cart(&mut self) {
        let snapshot = encode_cart(&self.cart);
        self.save(CART_KEY, snapshot);
    }

    fn save_wishlist(&mut self) {
        let snapshot = encode_wishlist(&self.wishlist);
        self.save(WISHLIST_KEY, snapshot);
    }

    fn save(&mut self, key: &'static str, snapshot: Result<String, serde_json::Error>) {
        let result = snapshot
            .map_err(|source| StoreError::Json {
                key: key.to_string(),
                source,
            })
            .and_then(|snapshot| self.store.save(key, &snapshot));

        if let Err(error) = result {
            warn!(key, %error, "failed to save snapshot");
            self.warnings.push(PersistenceWarning::SaveFailed { key, error });
        }
    }
}

fn load_snapshot<S, T>(
    store: &S,
    key: &'static str,
    decode: impl FnOnce(&str) -> Result<T, serde_json::Error>,
    warnings: &mut Vec<PersistenceWarning>,
) -> Option<T>
where
    S: SnapshotStore,
{
    let result = store.load(key).and_then(|snapshot| {
        snapshot
            .map(|snapshot| {
                decode(&snapshot).map_err(|source| StoreError::Json {
                    key: key.to_string(),
                    source,
                })
            })
            .transpose()
    });

    match result {
        Ok(loaded) => loaded,
        Err(error) => {
            warn!(key, %error, "failed to restore snapshot");
            warnings.push(PersistenceWarning::LoadFailed { key, error });
            None
        }
    }
}

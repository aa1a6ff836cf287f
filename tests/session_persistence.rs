//! Integration test for a shop session saved to disk and reopened.

use std::{fs, time::Instant};

use testresult::TestResult;

use crichub::{
    persistence::{CART_KEY, WISHLIST_KEY},
    prelude::*,
};

#[test]
fn test_session_survives_reopen() -> TestResult {
    let dir = tempfile::tempdir()?;

    {
        let mut session = ShopSession::open(Catalog::builtin()?, FileStore::new(dir.path()));

        session.add_to_cart(ProductId::new(1))?;
        session.add_to_cart(ProductId::new(4))?;
        session.update_quantity(ProductId::new(4), 3)?;
        session.toggle_wishlist(ProductId::new(7))?;

        // The promo code is session-only.
        session.apply_promo("SAVE10");

        assert!(session.take_warnings().is_empty());
    }

    let cart_snapshot = fs::read_to_string(dir.path().join(format!("{CART_KEY}.json")))?;

    assert_eq!(
        cart_snapshot,
        r#"[{"productId":1,"quantity":1},{"productId":4,"quantity":3}]"#
    );

    let mut session = ShopSession::open(Catalog::builtin()?, FileStore::new(dir.path()));

    assert_eq!(session.cart().quantity(ProductId::new(4)), 3);
    assert_eq!(session.cart().len(), 2);
    assert!(!session.cart().has_discount());
    assert!(session.is_wishlisted(ProductId::new(7)));
    assert!(session.take_warnings().is_empty());

    session.begin_checkout()?;
    session.set_shipping_address("Chinnaswamy Stadium, Bengaluru")?;
    session.select_payment_method(PaymentMethod::CashOnDelivery)?;
    session.confirm_order(Instant::now())?;

    let reopened = ShopSession::open(Catalog::builtin()?, FileStore::new(dir.path()));

    assert!(reopened.cart().is_empty());
    assert_eq!(reopened.wishlist().len(), 1);

    Ok(())
}

#[test]
fn test_wishlist_keeps_products_that_left_the_catalog() -> TestResult {
    let dir = tempfile::tempdir()?;

    {
        let mut session = ShopSession::open(Catalog::builtin()?, FileStore::new(dir.path()));
        session.toggle_wishlist(ProductId::new(9))?;
        session.add_to_cart(ProductId::new(9))?;
    }

    // Reopen against an empty catalog.
    let mut session = ShopSession::open(Catalog::default(), FileStore::new(dir.path()));

    assert!(session.is_wishlisted(ProductId::new(9)));
    assert!(session.cart().is_empty());

    let warnings = session.take_warnings();

    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        warnings.first(),
        Some(PersistenceWarning::UnknownProduct { key, .. }) if *key == CART_KEY
    ));

    // Unsaving still works for a product the catalog no longer lists.
    assert!(!session.toggle_wishlist(ProductId::new(9))?);

    let snapshot = fs::read_to_string(dir.path().join(format!("{WISHLIST_KEY}.json")))?;

    assert_eq!(snapshot, "[]");

    Ok(())
}

//! Integration test for a full purchase against the bundled catalog.
//!
//! Basket:
//!
//! - English Willow Bat (#1) x1: ₹8499.00
//! - White Leather Ball (#4) x3: 3 * ₹699.00 = ₹2097.00
//!
//! Subtotal ₹10596.00; SAVE10 takes off ₹1059.60, leaving ₹9536.40 to pay.

use std::time::{Duration, Instant};

use testresult::TestResult;

use crichub::prelude::*;

fn product(catalog: &Catalog, id: u64) -> TestResult<Product> {
    Ok(catalog
        .get(ProductId::new(id))
        .cloned()
        .ok_or("missing product")?)
}

#[test]
fn test_purchase_with_promo_code() -> TestResult {
    let catalog = Catalog::builtin()?;
    let bat = product(&catalog, 1)?;
    let ball = product(&catalog, 4)?;

    let mut cart = Cart::default();

    cart.add(&bat);
    cart.add(&ball);
    cart.add(&ball);
    cart.add(&ball);

    assert_eq!(format_money(&cart.total_price()), "₹10596.00");

    // Whitespace and case are ignored.
    assert!(cart.apply_promo("  save10 ").is_applied());

    assert_eq!(format_money(&cart.discount_amount()), "₹1059.60");
    assert_eq!(format_money(&cart.discounted_total()), "₹9536.40");

    cart.begin_checkout()?;

    // Confirming without an address keeps the order open with a message.
    let start = Instant::now();

    assert_eq!(
        cart.confirm_order(start).err(),
        Some(CheckoutError::MissingShippingAddress)
    );
    assert_eq!(cart.checkout_phase(), CheckoutPhase::Reviewing);
    assert_eq!(
        cart.checkout().message(),
        Some("Please enter your shipping address.")
    );

    cart.set_shipping_address("Gate 4, Eden Gardens, Kolkata")?;
    cart.select_payment_method(PaymentMethod::CreditCard)?;

    let order = cart.confirm_order(start)?;

    assert_eq!(format_money(&order.total()), "₹9536.40");
    assert_eq!(order.shipping_address(), "Gate 4, Eden Gardens, Kolkata");
    assert_eq!(order.promo_code(), Some(SAVE10));

    // Cart, promo and form are all cleared by the confirmation.
    assert!(cart.is_empty());
    assert_eq!(cart.promo_code(), "");
    assert!(!cart.has_discount());
    assert_eq!(cart.checkout().form(), &CheckoutForm::default());
    assert_eq!(cart.checkout_phase(), CheckoutPhase::Confirmed);

    // The thank-you screen lapses after the display interval.
    assert!(!cart.expire_confirmation(start + Duration::from_secs(1)));
    assert!(cart.expire_confirmation(start + Duration::from_secs(2)));
    assert_eq!(cart.checkout_phase(), CheckoutPhase::Idle);

    Ok(())
}

#[test]
fn test_invalid_code_after_valid_code_clears_discount() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mut cart = Cart::default();

    cart.add(&product(&catalog, 2)?);

    assert!(cart.apply_promo("SAVE10").is_applied());
    assert!(!cart.apply_promo("SAVE20").is_applied());

    assert!(cart.discount_amount().is_zero());
    assert_eq!(cart.discounted_total(), cart.total_price());

    Ok(())
}

#[test]
fn test_quantity_edits_keep_one_line_per_product() -> TestResult {
    let catalog = Catalog::builtin()?;
    let gloves = product(&catalog, 5)?;
    let pads = product(&catalog, 6)?;

    let mut cart = Cart::default();

    cart.add(&gloves);
    cart.add(&pads);
    cart.add(&gloves);

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.quantity(gloves.id), 2);

    cart.update_quantity(pads.id, -4)?;

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.line(pads.id), None);

    // Stale ids leave the cart as it was.
    assert_eq!(
        cart.remove(pads.id).err(),
        Some(CartError::LineNotFound(pads.id))
    );
    assert_eq!(cart.item_count(), 2);

    let expected = gloves.line_price(2);

    assert_eq!(*cart.total_price().amount(), expected);

    Ok(())
}

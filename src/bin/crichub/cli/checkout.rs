use std::{io::Write, time::Instant};

use anyhow::Context;
use clap::Args;
use crichub::checkout::PaymentMethod;

use crate::config::StoreConfig;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Shipping address
    #[arg(long)]
    address: Option<String>,

    /// Payment method
    #[arg(long, value_enum)]
    payment: Option<PaymentMethod>,

    /// Promo code
    #[arg(long)]
    promo: Option<String>,
}

pub(crate) fn run(
    args: CheckoutArgs,
    config: &StoreConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut session = super::open_session(config, out)?;

    if let Some(promo) = &args.promo {
        session.apply_promo(promo);
    }

    session.begin_checkout()?;

    if let Some(address) = args.address {
        session.set_shipping_address(address)?;
    }

    if let Some(payment) = args.payment {
        session.select_payment_method(payment)?;
    }

    super::write_cart(session.cart(), out)?;

    let order = session
        .confirm_order(Instant::now())
        .context("order not placed")?;

    super::report_warnings(&mut session, out)?;

    order.write_to(&mut *out)?;
    writeln!(out, "Thank you for your order!")?;

    Ok(())
}

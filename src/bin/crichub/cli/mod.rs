use std::io::Write;

use anyhow::Context;
use clap::Subcommand;
use crichub::{
    cart::Cart,
    catalog::Catalog,
    persistence::FileStore,
    pricing::{format_money, format_price, percent_points},
    products::Product,
    promotions::PromoBook,
    session::ShopSession,
};
use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::config::StoreConfig;

mod cart;
mod catalog;
mod checkout;
mod live;
mod score;
mod wishlist;

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Browse the catalog
    Catalog(catalog::CatalogArgs),

    /// Manage the cart
    Cart(cart::CartCommand),

    /// Manage the wishlist
    Wishlist(wishlist::WishlistCommand),

    /// Place an order for everything in the cart
    Checkout(checkout::CheckoutArgs),

    /// Score a match ball by ball
    Score(score::ScoreArgs),

    /// Show live scores from a feed file
    Live(live::LiveArgs),
}

impl Commands {
    pub(crate) fn run(self, config: &StoreConfig, out: &mut impl Write) -> anyhow::Result<()> {
        match self {
            Commands::Catalog(args) => catalog::run(&args, config, out),
            Commands::Cart(command) => cart::run(command, config, out),
            Commands::Wishlist(command) => wishlist::run(command, config, out),
            Commands::Checkout(args) => checkout::run(args, config, out),
            Commands::Score(args) => score::run(&args, out),
            Commands::Live(args) => live::run(&args, out),
        }
    }
}

fn load_catalog(config: &StoreConfig) -> anyhow::Result<Catalog> {
    match &config.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog from {}", path.display())),
        None => Catalog::builtin().context("bundled catalog is invalid"),
    }
}

fn open_session(
    config: &StoreConfig,
    out: &mut impl Write,
) -> anyhow::Result<ShopSession<FileStore>> {
    let catalog = load_catalog(config)?;

    let mut session = ShopSession::open_with(
        catalog,
        FileStore::new(&config.data_dir),
        PromoBook::default(),
        config.confirmation_display(),
    );

    report_warnings(&mut session, out)?;

    Ok(session)
}

fn report_warnings(
    session: &mut ShopSession<FileStore>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for warning in session.take_warnings() {
        writeln!(out, "! {warning}")?;
    }

    Ok(())
}

fn product_table<'a>(products: impl IntoIterator<Item = &'a Product>) -> Table {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Title", "Category", "Price", "Rating"]);

    for product in products {
        builder.push_record([
            product.id.get().to_string(),
            product.title.clone(),
            product.category.clone(),
            format_price(product),
            product.rating.map_or_else(String::new, |rating| {
                format!("{} ({})", rating.rate, rating.count)
            }),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..4), Alignment::right());

    table
}

fn write_cart(cart: &Cart, out: &mut impl Write) -> anyhow::Result<()> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Item", "Qty", "Line Total"]);

    for line in cart.iter() {
        builder.push_record([
            line.product_id().get().to_string(),
            line.product().title.clone(),
            line.quantity().to_string(),
            format_money(&line.total()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..4), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "Total: {}", format_money(&cart.total_price()))?;

    if cart.has_discount() {
        writeln!(
            out,
            "Discount: -{} ({}%)",
            format_money(&cart.discount_amount()),
            percent_points(cart.discount_rate())
        )?;
    }

    writeln!(out, "Final: {}", format_money(&cart.discounted_total()))?;

    Ok(())
}

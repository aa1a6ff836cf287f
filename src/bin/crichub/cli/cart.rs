use std::io::Write;

use clap::{Args, Subcommand};
use crichub::{products::ProductId, promotions::PromoOutcome};

use crate::config::StoreConfig;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its totals
    Show {
        /// Promo code to price the cart with
        #[arg(long)]
        promo: Option<String>,
    },

    /// Add one unit of a product
    Add {
        /// Product id
        id: u64,
    },

    /// Set a line's quantity; zero or less removes it
    Qty {
        /// Product id
        id: u64,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line
    Remove {
        /// Product id
        id: u64,
    },

    /// Empty the cart
    Clear,
}

pub(crate) fn run(
    command: CartCommand,
    config: &StoreConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut session = super::open_session(config, out)?;

    match command.command {
        CartSubcommand::Show { promo } => {
            if let Some(promo) = promo {
                match session.apply_promo(&promo) {
                    PromoOutcome::Applied { code, .. } => writeln!(out, "Applied {code}.")?,
                    PromoOutcome::Rejected { input } => {
                        writeln!(out, "Promo code {input:?} is not valid.")?;
                    }
                }
            }
        }
        CartSubcommand::Add { id } => {
            let quantity = session.add_to_cart(ProductId::new(id))?;
            writeln!(out, "{} now x{quantity}.", ProductId::new(id))?;
        }
        CartSubcommand::Qty { id, quantity } => {
            let quantity = session.update_quantity(ProductId::new(id), quantity)?;

            if quantity == 0 {
                writeln!(out, "Removed {}.", ProductId::new(id))?;
            } else {
                writeln!(out, "{} now x{quantity}.", ProductId::new(id))?;
            }
        }
        CartSubcommand::Remove { id } => {
            session.remove_from_cart(ProductId::new(id))?;
            writeln!(out, "Removed {}.", ProductId::new(id))?;
        }
        CartSubcommand::Clear => {
            session.clear_cart();
            writeln!(out, "Cart cleared.")?;
        }
    }

    super::report_warnings(&mut session, out)?;
    super::write_cart(session.cart(), out)
}

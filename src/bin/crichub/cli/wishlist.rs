use std::io::Write;

use clap::{Args, Subcommand};
use crichub::products::ProductId;

use crate::config::StoreConfig;

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// Show saved products
    Show,

    /// Save a product, or unsave it if already saved
    Toggle {
        /// Product id
        id: u64,
    },

    /// Move a saved product into the cart
    MoveToCart {
        /// Product id
        id: u64,
    },
}

pub(crate) fn run(
    command: WishlistCommand,
    config: &StoreConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut session = super::open_session(config, out)?;

    match command.command {
        WishlistSubcommand::Show => {}
        WishlistSubcommand::Toggle { id } => {
            let id = ProductId::new(id);

            if session.toggle_wishlist(id)? {
                writeln!(out, "Saved {id}.")?;
            } else {
                writeln!(out, "Removed {id} from the wishlist.")?;
            }
        }
        WishlistSubcommand::MoveToCart { id } => {
            let id = ProductId::new(id);

            session.add_to_cart(id)?;
            session.remove_from_wishlist(id);
            writeln!(out, "Moved {id} to the cart.")?;
        }
    }

    super::report_warnings(&mut session, out)?;

    if session.wishlist().is_empty() {
        writeln!(out, "Your wishlist is empty.")?;
    } else {
        writeln!(out, "{}", super::product_table(session.wishlist().iter()))?;
    }

    Ok(())
}

use std::io::Write;

use clap::Args;
use crichub::catalog::ALL_CATEGORIES;

use crate::config::StoreConfig;

#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Only show products in this category
    #[arg(long, default_value = ALL_CATEGORIES)]
    category: String,

    /// Case-insensitive search over titles and descriptions
    #[arg(long, default_value = "")]
    search: String,

    /// List the categories instead of products
    #[arg(long)]
    categories: bool,
}

pub(crate) fn run(
    args: &CatalogArgs,
    config: &StoreConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let catalog = super::load_catalog(config)?;

    if args.categories {
        for category in catalog.categories() {
            writeln!(out, "{category}")?;
        }

        return Ok(());
    }

    let products = catalog.filter(&args.category, &args.search);

    if products.is_empty() {
        writeln!(out, "No products match.")?;

        return Ok(());
    }

    writeln!(out, "{}", super::product_table(products))?;

    Ok(())
}

//! One-shot catalog commands.
//!
//! These call the API directly instead of going through the store actions so
//! that a failed request ends the run with an error.

use shopfront_client::Shop;
use shopfront_core::{Filters, FiltersUpdate};

use super::{CliError, FilterArgs, render};

/// List products matching `args` merged over the default filters.
pub async fn products(shop: &Shop, args: FilterArgs) -> Result<(), CliError> {
    let mut filters = Filters::default();
    filters.merge(FiltersUpdate::from(args));
    tracing::debug!(?filters, "Listing products");

    let products = shop.api().products(&filters).await?;
    render::print(&render::products(&products));
    Ok(())
}

/// List the best-selling products.
pub async fn most_bought(shop: &Shop) -> Result<(), CliError> {
    let products = shop.api().most_bought().await?;
    render::print(&render::products(&products));
    Ok(())
}

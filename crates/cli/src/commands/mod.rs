//! CLI command implementations.

pub mod catalog;
pub mod render;
pub mod shell;

use clap::Args;
use shopfront_client::ClientError;
use shopfront_client::config::ConfigError;
use shopfront_core::{Filters, FiltersUpdate, Price};
use thiserror::Error;

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{}", .0.user_message())]
    Client(#[from] ClientError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Product filter flags shared by `products` and the shell's `filter`.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only products in this category (empty for all)
    #[arg(long)]
    pub category: Option<String>,

    /// Free-text search over title and description
    #[arg(long)]
    pub search: Option<String>,

    /// Lower price bound (0 for none)
    #[arg(long)]
    pub min_price: Option<Price>,

    /// Upper price bound (0 for none)
    #[arg(long)]
    pub max_price: Option<Price>,

    /// Only sale items
    #[arg(long, conflicts_with_all = ["no_sale", "any_sale"])]
    pub sale: bool,

    /// Only regular-price items
    #[arg(long, conflicts_with = "any_sale")]
    pub no_sale: bool,

    /// Drop the sale restriction
    #[arg(long)]
    pub any_sale: bool,

    /// Start from the default filters
    #[arg(long)]
    pub reset: bool,
}

impl From<FilterArgs> for FiltersUpdate {
    fn from(args: FilterArgs) -> Self {
        let mut update = if args.reset {
            reset_update()
        } else {
            Self::default()
        };

        if let Some(category) = args.category {
            update = update.category(category);
        }
        if let Some(search) = args.search {
            update = update.search(search);
        }
        if let Some(price) = args.min_price {
            update = update.min_price(price);
        }
        if let Some(price) = args.max_price {
            update = update.max_price(price);
        }
        if args.sale {
            update = update.is_sale(Some(true));
        } else if args.no_sale {
            update = update.is_sale(Some(false));
        } else if args.any_sale {
            update = update.is_sale(None);
        }

        update
    }
}

/// An update that puts every field back to its default.
fn reset_update() -> FiltersUpdate {
    let Filters {
        category,
        min_price,
        max_price,
        search,
        is_sale,
        sold,
    } = Filters::default();

    FiltersUpdate::default()
        .category(category)
        .min_price(min_price)
        .max_price(max_price)
        .search(search)
        .is_sale(is_sale)
        .sold(sold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_only_touch_given_fields() {
        let update = FiltersUpdate::from(FilterArgs {
            category: Some("Shoes".to_string()),
            sale: true,
            ..FilterArgs::default()
        });

        let mut filters = Filters {
            search: "red".to_string(),
            ..Filters::default()
        };
        filters.merge(update);

        assert_eq!(filters.category, "Shoes");
        assert_eq!(filters.search, "red");
        assert_eq!(filters.is_sale, Some(true));
    }

    #[test]
    fn test_filter_args_reset() {
        let mut filters = Filters {
            category: "Shoes".to_string(),
            is_sale: Some(false),
            ..Filters::default()
        };
        filters.merge(FilterArgs {
            reset: true,
            ..FilterArgs::default()
        }
        .into());

        assert_eq!(filters, Filters::default());
    }

    #[test]
    fn test_any_sale_clears_flag() {
        let mut filters = Filters {
            is_sale: Some(true),
            ..Filters::default()
        };
        filters.merge(FilterArgs {
            any_sale: true,
            ..FilterArgs::default()
        }
        .into());

        assert_eq!(filters.is_sale, None);
    }
}

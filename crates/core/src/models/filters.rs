//! Product listing filters.
//!
//! Filters are pure query parameters. They live only as long as the client
//! session and are translated into the query string of the products endpoint.

use serde::{Deserialize, Serialize};

use crate::types::Price;

/// Upper price bound applied until the user picks another one.
pub const DEFAULT_MAX_PRICE: u32 = 2000;

/// Current product filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Category name; empty means every category.
    pub category: String,
    /// Lower price bound; zero means unbounded.
    pub min_price: Price,
    /// Upper price bound; zero means unbounded.
    pub max_price: Price,
    /// Free-text search over title and description; empty means no search.
    pub search: String,
    /// `Some(true)` for sale items only, `Some(false)` for regular items only.
    pub is_sale: Option<bool>,
    /// Restrict to sold (or unsold) products.
    pub sold: Option<bool>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            category: String::new(),
            min_price: Price::ZERO,
            max_price: Price::from(DEFAULT_MAX_PRICE),
            search: String::new(),
            is_sale: None,
            sold: None,
        }
    }
}

impl Filters {
    /// Shallow merge: every field present in `update` replaces the current
    /// value, every absent field is kept.
    pub fn merge(&mut self, update: FiltersUpdate) {
        let FiltersUpdate {
            category,
            min_price,
            max_price,
            search,
            is_sale,
            sold,
        } = update;

        if let Some(category) = category {
            self.category = category;
        }
        if let Some(min_price) = min_price {
            self.min_price = min_price;
        }
        if let Some(max_price) = max_price {
            self.max_price = max_price;
        }
        if let Some(search) = search {
            self.search = search;
        }
        if let Some(is_sale) = is_sale {
            self.is_sale = is_sale;
        }
        if let Some(sold) = sold {
            self.sold = sold;
        }
    }

    /// Query parameters for the products endpoint.
    ///
    /// Empty text, zero price bounds and unset flags are left out so the
    /// backend applies no constraint for them.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if !self.category.is_empty() {
            params.push(("category", self.category.clone()));
        }
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }
        if !self.min_price.is_zero() {
            params.push(("min_price", self.min_price.amount().normalize().to_string()));
        }
        if !self.max_price.is_zero() {
            params.push(("max_price", self.max_price.amount().normalize().to_string()));
        }
        if let Some(is_sale) = self.is_sale {
            params.push(("is_sale", is_sale.to_string()));
        }
        if let Some(sold) = self.sold {
            params.push(("sold", sold.to_string()));
        }

        params
    }
}

/// A partial filter change. `None` fields leave the current value untouched.
///
/// The tri-state flags use `Some(None)` to clear the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiltersUpdate {
    pub category: Option<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub search: Option<String>,
    pub is_sale: Option<Option<bool>>,
    pub sold: Option<Option<bool>>,
}

impl FiltersUpdate {
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn min_price(mut self, price: Price) -> Self {
        self.min_price = Some(price);
        self
    }

    #[must_use]
    pub const fn max_price(mut self, price: Price) -> Self {
        self.max_price = Some(price);
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub const fn is_sale(mut self, is_sale: Option<bool>) -> Self {
        self.is_sale = Some(is_sale);
        self
    }

    #[must_use]
    pub const fn sold(mut self, sold: Option<bool>) -> Self {
        self.sold = Some(sold);
        self
    }

    /// Returns `true` if the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

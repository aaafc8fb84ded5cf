//! Catalog products.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A catalog item as listed by the products endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Display name of the product.
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub sold: bool,
    /// Sale flag.
    #[serde(default)]
    pub is_sale: bool,
    #[serde(default)]
    pub date_of_sale: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

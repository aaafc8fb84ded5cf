//! Shopping cart lines and the totals derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Product;
use crate::types::{CartItemId, Price};

/// One line of the user's cart.
///
/// The backend keeps at most one line per product and deletes a line rather
/// than letting its quantity drop below one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product: Product,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// Sum of `price × quantity` over every line.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Price {
    items.iter().map(CartItem::line_total).sum()
}

/// Number of units across every line, saturating at `u32::MAX`.
#[must_use]
pub fn cart_item_count(items: &[CartItem]) -> u32 {
    items
        .iter()
        .fold(0, |count, item| count.saturating_add(item.quantity))
}

//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Product;
use crate::types::{OrderId, OrderStatus, PaymentMode, Price};

/// An order row. Placing an order turns every cart line into one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub product: Product,
    /// Unit price captured when the order was placed.
    pub price: Price,
    pub quantity: u32,
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
}

impl Order {
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        if self.is_cancelled {
            OrderStatus::Cancelled
        } else {
            OrderStatus::Active
        }
    }

    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        self.status().is_cancellable()
    }

    /// Captured unit price times quantity.
    #[must_use]
    pub fn total(&self) -> Price {
        self.price * self.quantity
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ORDER_JSON: &str = r#"{
        "id": 11,
        "product": {
            "id": 5, "title": "Kettle", "price": 1499.0, "description": "Steel",
            "category": "home", "image_url": "https://img.example/kettle.png",
            "sold": false, "is_sale": true, "date_of_sale": "2024-05-01",
            "created_at": "2024-04-01T08:00:00Z"
        },
        "price": 1299.5,
        "quantity": 2,
        "payment_mode": "ONLINE",
        "is_cancelled": false,
        "created_at": "2024-05-02T09:30:00.5+05:30"
    }"#;

    #[test]
    fn test_deserialize_backend_order() {
        let order: Order = serde_json::from_str(ORDER_JSON).unwrap();
        assert_eq!(order.id, OrderId::new(11));
        assert_eq!(order.payment_mode, PaymentMode::Online);
        assert_eq!(order.total(), "2599".parse().unwrap());
        assert!(order.product.is_sale);
    }

    #[test]
    fn test_status_follows_cancelled_flag() {
        let mut order: Order = serde_json::from_str(ORDER_JSON).unwrap();
        assert_eq!(order.status(), OrderStatus::Active);
        assert!(order.is_cancellable());

        order.is_cancelled = true;
        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert!(!order.is_cancellable());
    }
}

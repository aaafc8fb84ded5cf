//! Order actions.

use shopfront_core::{Order, OrderId, PaymentMode};
use tracing::{info, instrument};

use super::note_failure;
use crate::Shop;
use crate::error::{Result, add_breadcrumb, report_swallowed};

impl Shop {
    /// Load the user's orders.
    #[instrument(skip(self))]
    pub async fn fetch_orders(&mut self) {
        match self.api().orders().await {
            Ok(orders) => self.state_mut().set_orders(orders),
            Err(e) => report_swallowed("fetch_orders", &e),
        }
    }

    /// Place an order for the whole cart, then refresh cart, orders and
    /// best sellers once each. Returns the created orders.
    ///
    /// # Errors
    ///
    /// Returns the API error if the backend rejects the order (for example
    /// because the cart is empty); nothing is refreshed in that case.
    #[instrument(skip(self))]
    pub async fn place_order(&mut self, payment_mode: PaymentMode) -> Result<Vec<Order>> {
        self.api().http().ensure_csrf().await;
        let placed = self
            .api()
            .place_order(payment_mode)
            .await
            .inspect_err(|e| note_failure("place_order", e))?;

        info!(orders = placed.len(), %payment_mode, "Order placed");
        add_breadcrumb(
            "orders",
            "Placed order",
            Some(&[("payment_mode", payment_mode.to_string().as_str())]),
        );

        self.fetch_cart().await;
        self.fetch_orders().await;
        self.fetch_most_bought().await;
        Ok(placed)
    }

    /// Cancel an order, then refresh orders and best sellers.
    ///
    /// # Errors
    ///
    /// Returns the API error if the backend rejects the cancellation (for
    /// example because the order is already cancelled).
    #[instrument(skip(self))]
    pub async fn cancel_order(&mut self, id: OrderId) -> Result<Order> {
        self.api().http().ensure_csrf().await;
        let cancelled = self
            .api()
            .cancel_order(id)
            .await
            .inspect_err(|e| note_failure("cancel_order", e))?;

        add_breadcrumb("orders", "Cancelled order", Some(&[("order_id", id.to_string().as_str())]));

        self.fetch_orders().await;
        self.fetch_most_bought().await;
        Ok(cancelled)
    }
}

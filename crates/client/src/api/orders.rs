//! Order endpoints.

use shopfront_core::{Order, OrderId, PaymentMode};
use tracing::instrument;

use super::{PlaceOrderRequest, ShopApi};
use crate::error::Result;

impl ShopApi {
    /// Orders of the session's user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not an order list.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>> {
        self.http.get("orders/", &[]).await
    }

    /// Turn every cart line into an order and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the backend answers 400 when the
    /// cart is empty.
    #[instrument(skip(self))]
    pub async fn place_order(&self, payment_mode: PaymentMode) -> Result<Vec<Order>> {
        let body = PlaceOrderRequest { payment_mode };
        self.http.post("orders/", Some(&body)).await
    }

    /// Cancel an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the backend answers 400 when the
    /// order is already cancelled.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order> {
        self.http.post(&format!("orders/{id}/cancel/"), None::<&()>).await
    }
}

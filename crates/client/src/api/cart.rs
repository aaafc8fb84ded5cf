//! Cart endpoints.

use serde::de::IgnoredAny;
use shopfront_core::{CartItem, CartItemId, ProductId, QuantityAction};
use tracing::instrument;

use super::{AddToCartRequest, ShopApi, UpdateQuantityRequest};
use crate::error::Result;

impl ShopApi {
    /// Lines of the session's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a cart.
    #[instrument(skip(self))]
    pub async fn cart(&self) -> Result<Vec<CartItem>> {
        self.http.get("cart/", &[]).await
    }

    /// Add `quantity` units of a product. The backend merges them into an
    /// existing line for the same product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the product does not exist.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> Result<()> {
        let body = AddToCartRequest {
            product_id,
            quantity,
        };
        let _: IgnoredAny = self.http.post("cart/", Some(&body)).await?;
        Ok(())
    }

    /// Increase or decrease a line by one unit. Decreasing the last unit
    /// deletes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the line does not exist.
    #[instrument(skip(self))]
    pub async fn update_cart_quantity(&self, id: CartItemId, action: QuantityAction) -> Result<()> {
        let body = UpdateQuantityRequest { action };
        let _: IgnoredAny = self
            .http
            .post(&format!("cart/{id}/update_quantity/"), Some(&body))
            .await?;
        Ok(())
    }

    /// Delete a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the line does not exist.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, id: CartItemId) -> Result<()> {
        self.http.delete(&format!("cart/{id}/")).await
    }

    /// Delete every cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<()> {
        self.http.delete("cart/clear/").await
    }
}

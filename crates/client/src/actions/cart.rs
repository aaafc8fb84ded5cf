//! Cart actions. Every mutation re-fetches the cart afterwards.

use shopfront_core::{CartItemId, ProductId, QuantityAction};
use tracing::instrument;

use super::note_failure;
use crate::Shop;
use crate::error::{Result, add_breadcrumb, report_swallowed};

impl Shop {
    /// Load the cart.
    #[instrument(skip(self))]
    pub async fn fetch_cart(&mut self) {
        match self.api().cart().await {
            Ok(cart) => self.state_mut().set_cart(cart),
            Err(e) => report_swallowed("fetch_cart", &e),
        }
    }

    /// Add one unit of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns the API error if the backend rejects the addition.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&mut self, product_id: ProductId) -> Result<()> {
        self.api().http().ensure_csrf().await;
        self.api()
            .add_to_cart(product_id, 1)
            .await
            .inspect_err(|e| note_failure("add_to_cart", e))?;

        add_breadcrumb(
            "cart",
            "Added product",
            Some(&[("product_id", product_id.to_string().as_str())]),
        );
        self.fetch_cart().await;
        Ok(())
    }

    /// Increase or decrease a cart line by one unit.
    ///
    /// # Errors
    ///
    /// Returns the API error if the backend rejects the change.
    #[instrument(skip(self))]
    pub async fn update_cart_quantity(
        &mut self,
        id: CartItemId,
        action: QuantityAction,
    ) -> Result<()> {
        self.api().http().ensure_csrf().await;
        self.api()
            .update_cart_quantity(id, action)
            .await
            .inspect_err(|e| note_failure("update_cart_quantity", e))?;

        self.fetch_cart().await;
        Ok(())
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns the API error if the backend rejects the removal.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&mut self, id: CartItemId) -> Result<()> {
        self.api().http().ensure_csrf().await;
        self.api()
            .remove_from_cart(id)
            .await
            .inspect_err(|e| note_failure("remove_from_cart", e))?;

        self.fetch_cart().await;
        Ok(())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns the API error if the backend rejects the request.
    #[instrument(skip(self))]
    pub async fn clear_cart(&mut self) -> Result<()> {
        self.api().http().ensure_csrf().await;
        self.api()
            .clear_cart()
            .await
            .inspect_err(|e| note_failure("clear_cart", e))?;

        self.fetch_cart().await;
        Ok(())
    }
}

//! Catalog endpoints.

use shopfront_core::{Filters, Product};
use tracing::instrument;

use super::ShopApi;
use crate::error::Result;

impl ShopApi {
    /// Products matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a product list.
    #[instrument(skip(self, filters))]
    pub async fn products(&self, filters: &Filters) -> Result<Vec<Product>> {
        self.http.get("products/", &filters.query_params()).await
    }

    /// Up to ten products ranked by quantity ordered, cancelled orders excluded.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a product list.
    #[instrument(skip(self))]
    pub async fn most_bought(&self) -> Result<Vec<Product>> {
        self.http.get("products/most_bought/", &[]).await
    }
}

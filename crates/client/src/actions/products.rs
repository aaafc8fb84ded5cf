//! Catalog actions.

use shopfront_core::FiltersUpdate;
use tracing::instrument;

use crate::Shop;
use crate::error::report_swallowed;

impl Shop {
    /// Load the product listing for the current filters.
    ///
    /// The loading flag is raised for the duration of the request and lowered
    /// whether or not it succeeds.
    #[instrument(skip(self))]
    pub async fn fetch_products(&mut self) {
        self.state_mut().set_loading(true);

        match self.api().products(self.state().filters()).await {
            Ok(products) => self.state_mut().set_products(products),
            Err(e) => report_swallowed("fetch_products", &e),
        }

        self.state_mut().set_loading(false);
    }

    /// Merge `update` into the filters and reload the listing.
    #[instrument(skip(self))]
    pub async fn apply_filters(&mut self, update: FiltersUpdate) {
        self.state_mut().set_filters(update);
        self.fetch_products().await;
    }

    /// Load the best-selling products.
    #[instrument(skip(self))]
    pub async fn fetch_most_bought(&mut self) {
        match self.api().most_bought().await {
            Ok(products) => self.state_mut().set_most_bought(products),
            Err(e) => report_swallowed("fetch_most_bought", &e),
        }
    }
}

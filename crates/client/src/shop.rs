//! The `Shop` controller: owner of the state store and the API client.

use crate::api::ShopApi;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::store::State;

/// Controller owning the application state and the API client.
///
/// Actions take `&mut self`, so at most one action writes to the state at a
/// time. Readers get the state through [`Shop::state`].
pub struct Shop {
    api: ShopApi,
    state: State,
}

impl Shop {
    /// Create a shop client for the configured API with empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_api(ShopApi::new(HttpClient::new(config)?)))
    }

    /// Create a shop client around an existing API client.
    #[must_use]
    pub fn with_api(api: ShopApi) -> Self {
        Self {
            api,
            state: State::default(),
        }
    }

    /// Read-only view of the application state.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// The typed API client.
    #[must_use]
    pub const fn api(&self) -> &ShopApi {
        &self.api
    }

    pub(crate) const fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

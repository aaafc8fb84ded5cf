//! Typed access to the shop REST API.
//!
//! One method per endpoint, grouped by resource. Methods only talk to the
//! backend; committing results into client state is the job of the actions
//! in [`crate::actions`].
//!
//! | Resource | Endpoints |
//! |----------|-----------|
//! | auth     | `auth/login/`, `auth/logout/`, `auth/user/` |
//! | products | `products/`, `products/most_bought/` |
//! | cart     | `cart/`, `cart/{id}/update_quantity/`, `cart/{id}/`, `cart/clear/` |
//! | orders   | `orders/`, `orders/{id}/cancel/` |

mod auth;
mod cart;
mod orders;
mod products;
pub mod types;

pub use types::*;

use crate::http::HttpClient;

/// Typed client for the shop REST API.
#[derive(Clone)]
pub struct ShopApi {
    http: HttpClient,
}

impl ShopApi {
    /// Wrap an HTTP client.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// The underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }
}

//! Shopfront client library.
//!
//! Client-side data access and application state for the Shopfront API:
//! an HTTP client that echoes the CSRF cookie on writes, a typed API over
//! the backend's endpoints, a single application store with the actions
//! that mutate it, and a router guard for views behind authentication.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod actions;
pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod shop;
pub mod store;
pub mod telemetry;

pub use api::{LoginCredentials, LoginResponse, ShopApi};
pub use config::ClientConfig;
pub use error::{ClientError, ErrorKind, Result};
pub use guard::{Navigation, Route};
pub use http::HttpClient;
pub use shop::Shop;
pub use store::State;

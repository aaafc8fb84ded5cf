//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all Shopfront components:
//! - `client` - HTTP client, store, actions and router guard for the shop API
//! - `cli` - Command-line front end driving the client
//! - `integration-tests` - Fake backend and end-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere,
//! including by the fake backend used in tests.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, mobile numbers and statuses
//! - [`models`] - Records exchanged with the shop API (users, products, cart, orders, filters)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;

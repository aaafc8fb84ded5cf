//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod mobile;
pub mod price;
pub mod status;

pub use id::*;
pub use mobile::{MobileNumber, MobileNumberError};
pub use price::Price;
pub use status::*;

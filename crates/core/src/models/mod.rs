//! Records exchanged with the shop API.
//!
//! Field names follow the backend's JSON so the records deserialize directly
//! from responses.

pub mod cart;
pub mod filters;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{CartItem, cart_item_count, cart_total};
pub use filters::{Filters, FiltersUpdate};
pub use order::Order;
pub use product::Product;
pub use user::User;

//! Application state store.
//!
//! [`State`] is the single in-memory source of truth for everything the UI
//! shows. It is owned by [`crate::Shop`]; outside this crate it can only be
//! read. Writes go through the named mutations below, which the actions call
//! after a backend response arrives.

use shopfront_core::{
    CartItem, Filters, FiltersUpdate, Order, Price, Product, User, cart_item_count, cart_total,
};
use tracing::trace;

/// Client-side application state.
#[derive(Debug, Clone, Default)]
pub struct State {
    user: Option<User>,
    products: Vec<Product>,
    cart: Vec<CartItem>,
    orders: Vec<Order>,
    most_bought: Vec<Product>,
    filters: Filters,
    loading: bool,
}

// =============================================================================
// Accessors
// =============================================================================

impl State {
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn most_bought(&self) -> &[Product] {
        &self.most_bought
    }

    #[must_use]
    pub const fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Whether a product listing request is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// A user is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Products matching the current filters. Filtering happens server-side,
    /// so this is the listing exactly as the backend returned it.
    #[must_use]
    pub fn filtered_products(&self) -> &[Product] {
        &self.products
    }

    /// Σ(price × quantity) over the cart.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        cart_total(&self.cart)
    }

    /// Units across all cart lines.
    #[must_use]
    pub fn cart_item_count(&self) -> u32 {
        cart_item_count(&self.cart)
    }
}

// =============================================================================
// Mutations
// =============================================================================

impl State {
    pub(crate) fn set_user(&mut self, user: Option<User>) {
        trace!(authenticated = user.is_some(), "set_user");
        self.user = user;
    }

    pub(crate) fn set_products(&mut self, products: Vec<Product>) {
        trace!(count = products.len(), "set_products");
        self.products = products;
    }

    pub(crate) fn set_cart(&mut self, cart: Vec<CartItem>) {
        trace!(lines = cart.len(), "set_cart");
        self.cart = cart;
    }

    pub(crate) fn set_orders(&mut self, orders: Vec<Order>) {
        trace!(count = orders.len(), "set_orders");
        self.orders = orders;
    }

    pub(crate) fn set_most_bought(&mut self, products: Vec<Product>) {
        trace!(count = products.len(), "set_most_bought");
        self.most_bought = products;
    }

    /// Shallow merge into the current filters.
    pub(crate) fn set_filters(&mut self, update: FiltersUpdate) {
        trace!(?update, "set_filters");
        self.filters.merge(update);
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        trace!(loading, "set_loading");
        self.loading = loading;
    }

    /// Drop everything scoped to the session: user, cart and orders go together.
    pub(crate) fn clear_user(&mut self) {
        trace!("clear_user");
        self.user = None;
        self.cart.clear();
        self.orders.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use shopfront_core::{
        CartItemId, MobileNumber, OrderId, PaymentMode, ProductId, UserId,
    };

    use super::*;

    fn product(id: i64, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: price.parse().unwrap(),
            description: String::new(),
            category: "misc".to_string(),
            image_url: String::new(),
            sold: false,
            is_sale: false,
            date_of_sale: None,
            created_at: Utc::now(),
        }
    }

    fn line(id: i64, price: &str, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId::new(id),
            product: product(id, price),
            quantity,
            created_at: Utc::now(),
        }
    }

    fn order(id: i64) -> Order {
        Order {
            id: OrderId::new(id),
            product: product(id, "10"),
            price: "10".parse().unwrap(),
            quantity: 1,
            payment_mode: PaymentMode::Cod,
            is_cancelled: false,
            created_at: Utc::now(),
        }
    }

    fn user() -> User {
        User {
            id: UserId::new(1),
            mobile: MobileNumber::parse("9999999999").unwrap(),
            full_name: "Demo User".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = State::default();
        assert!(!state.is_authenticated());
        assert!(state.products().is_empty());
        assert!(!state.loading());
        assert_eq!(state.cart_total(), Price::ZERO);
        assert_eq!(state.filters(), &Filters::default());
    }

    #[test]
    fn test_cart_getters_follow_cart() {
        let mut state = State::default();
        state.set_cart(vec![line(1, "100", 2), line(2, "49.5", 1)]);

        assert_eq!(state.cart_total(), "249.5".parse().unwrap());
        assert_eq!(state.cart_item_count(), 3);

        state.set_cart(vec![line(1, "100", 1)]);
        assert_eq!(state.cart_total(), Price::from(100));
        assert_eq!(state.cart_item_count(), 1);
    }

    #[test]
    fn test_clear_user_drops_session_data() {
        let mut state = State::default();
        state.set_user(Some(user()));
        state.set_cart(vec![line(1, "5", 1)]);
        state.set_orders(vec![order(1), order(2)]);
        state.set_products(vec![product(3, "7")]);
        state.set_most_bought(vec![product(3, "7")]);

        state.clear_user();

        assert!(state.user().is_none());
        assert!(state.cart().is_empty());
        assert!(state.orders().is_empty());
        // Catalog data is not session-scoped
        assert_eq!(state.products().len(), 1);
        assert_eq!(state.most_bought().len(), 1);
    }

    #[test]
    fn test_clear_user_from_empty_state() {
        let mut state = State::default();
        state.clear_user();
        assert!(state.user().is_none());
        assert!(state.cart().is_empty());
        assert!(state.orders().is_empty());
    }

    #[test]
    fn test_set_filters_merges() {
        let mut state = State::default();
        state.set_filters(FiltersUpdate::default().search("mug").max_price(Price::from(500)));
        state.set_filters(FiltersUpdate::default().category("X"));

        let filters = state.filters();
        assert_eq!(filters.category, "X");
        assert_eq!(filters.search, "mug");
        assert_eq!(filters.max_price, Price::from(500));
        assert_eq!(filters.min_price, Price::ZERO);
    }

    #[test]
    fn test_filtered_products_is_server_listing() {
        let mut state = State::default();
        state.set_products(vec![product(1, "1"), product(2, "2")]);
        assert_eq!(state.filtered_products(), state.products());
    }
}

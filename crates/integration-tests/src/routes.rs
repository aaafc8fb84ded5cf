//! Fake shop API handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /api/                              - Issue the CSRF cookie
//! POST   /api/auth/login/                   - Log in, set the session cookie
//! POST   /api/auth/logout/                  - End the session
//! GET    /api/auth/user/                    - Current user (requires auth)
//! GET    /api/products/                     - Filtered catalog
//! GET    /api/products/most_bought/         - Top sellers over active orders
//! GET    /api/cart/                         - Cart lines (requires auth)
//! POST   /api/cart/                         - Add or merge a line (requires auth)
//! DELETE /api/cart/clear/                   - Empty the cart (requires auth)
//! DELETE /api/cart/{id}/                    - Remove a line (requires auth)
//! POST   /api/cart/{id}/update_quantity/    - Increase or decrease (requires auth)
//! GET    /api/orders/                       - Orders (requires auth)
//! POST   /api/orders/                       - Turn the cart into orders (requires auth)
//! POST   /api/orders/{id}/cancel/           - Cancel an order (requires auth)
//! ```

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use shopfront_core::{
    CartItem, CartItemId, MobileNumber, Order, OrderId, PaymentMode, Price, Product, ProductId,
    QuantityAction, User, UserId,
};

use crate::{Backend, CSRF_COOKIE, SESSION_COOKIE, Shared, fixtures, lock};

/// Number of products `most_bought` returns at most.
const MOST_BOUGHT_LIMIT: usize = 10;

/// JSON error body in the backend's `{key: message}` shape.
pub fn error(status: StatusCode, key: &str, message: &str) -> Response {
    (status, Json(json!({ key: message }))).into_response()
}

fn not_authenticated() -> Response {
    error(
        StatusCode::FORBIDDEN,
        "detail",
        "Authentication credentials were not provided.",
    )
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "detail", "Not found.")
}

/// Value of cookie `name` from the request's `Cookie` header.
pub fn cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| shopfront_client::http::csrf::cookie_value(value, name))
}

impl Backend {
    /// User owning the session cookie in `headers`, if it is still active.
    fn session_user(&self, headers: &HeaderMap) -> Option<User> {
        let (token, user) = self.session.as_ref()?;
        let presented = cookie(headers, SESSION_COOKIE)?;
        (presented == *token).then(|| user.clone())
    }

    fn product(&self, id: ProductId) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }
}

// =============================================================================
// CSRF and session
// =============================================================================

pub async fn root(State(shared): State<Shared>) -> Response {
    let backend = lock(&shared);
    let body = Json(json!({ "message": "Shop API" }));

    if backend.issue_csrf_cookie {
        let cookie = format!("{CSRF_COOKIE}={}; Path=/; SameSite=Lax", backend.csrf_token);
        (AppendHeaders([(header::SET_COOKIE, cookie)]), body).into_response()
    } else {
        body.into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    mobile: String,
    otp: String,
    full_name: Option<String>,
}

pub async fn login(State(shared): State<Shared>, Json(body): Json<LoginBody>) -> Response {
    let Ok(mobile) = MobileNumber::parse(&body.mobile) else {
        return error(StatusCode::BAD_REQUEST, "error", "Invalid mobile number");
    };
    if body.otp != fixtures::OTP {
        return error(StatusCode::BAD_REQUEST, "error", "Invalid OTP");
    }

    let mut backend = lock(&shared);
    let existing = backend.users.get(&mobile).cloned();
    let user = if let Some(user) = existing {
        user
    } else {
        let user = User {
            id: UserId::new(backend.next_id()),
            mobile: mobile.clone(),
            full_name: body.full_name.unwrap_or_default(),
            created_at: Utc::now(),
        };
        backend.users.insert(mobile, user.clone());
        user
    };

    let session = format!("session-{}", backend.next_id());
    backend.session = Some((session.clone(), user.clone()));
    // Logging in rotates the CSRF token
    backend.csrf_token = format!("csrf-rotated-{}", backend.next_id());

    let cookies = [
        (
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}={session}; Path=/; HttpOnly; SameSite=Lax"),
        ),
        (
            header::SET_COOKIE,
            format!("{CSRF_COOKIE}={}; Path=/; SameSite=Lax", backend.csrf_token),
        ),
    ];
    let body = json!({ "user": user, "message": "Login successful" });
    (AppendHeaders(cookies), Json(body)).into_response()
}

pub async fn logout(State(shared): State<Shared>) -> Response {
    lock(&shared).session = None;
    let expired = format!("{SESSION_COOKIE}=; Path=/; Max-Age=0");
    (
        AppendHeaders([(header::SET_COOKIE, expired)]),
        Json(json!({ "message": "Logged out successfully" })),
    )
        .into_response()
}

pub async fn current_user(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    match lock(&shared).session_user(&headers) {
        Some(user) => Json(user).into_response(),
        None => not_authenticated(),
    }
}

// =============================================================================
// Products
// =============================================================================

fn flag(params: &HashMap<String, String>, key: &str) -> Option<bool> {
    params.get(key).map(|value| value == "true")
}

fn price(params: &HashMap<String, String>, key: &str) -> Option<Price> {
    params.get(key).and_then(|value| value.parse().ok())
}

pub async fn products(
    State(shared): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let category = params.get("category");
    let search = params.get("search").map(|s| s.to_lowercase());
    let min_price = price(&params, "min_price");
    let max_price = price(&params, "max_price");
    let is_sale = flag(&params, "is_sale");
    let sold = flag(&params, "sold");

    let backend = lock(&shared);
    let matching: Vec<&Product> = backend
        .products
        .iter()
        .filter(|p| category.is_none_or(|c| p.category == *c))
        .filter(|p| {
            search.as_ref().is_none_or(|s| {
                p.title.to_lowercase().contains(s) || p.description.to_lowercase().contains(s)
            })
        })
        .filter(|p| min_price.is_none_or(|min| p.price >= min))
        .filter(|p| max_price.is_none_or(|max| p.price <= max))
        .filter(|p| is_sale.is_none_or(|sale| p.is_sale == sale))
        .filter(|p| sold.is_none_or(|sold| p.sold == sold))
        .collect();

    Json(matching).into_response()
}

pub async fn most_bought(State(shared): State<Shared>) -> Response {
    let backend = lock(&shared);

    let mut totals: HashMap<ProductId, u32> = HashMap::new();
    for order in backend.orders.iter().filter(|o| !o.is_cancelled) {
        *totals.entry(order.product.id).or_default() += order.quantity;
    }

    let mut ranked: Vec<(ProductId, u32)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let top: Vec<Product> = ranked
        .into_iter()
        .take(MOST_BOUGHT_LIMIT)
        .filter_map(|(id, _)| backend.product(id))
        .collect();

    Json(top).into_response()
}

// =============================================================================
// Cart
// =============================================================================

pub async fn cart(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    let backend = lock(&shared);
    if backend.session_user(&headers).is_none() {
        return not_authenticated();
    }
    Json(&backend.cart).into_response()
}

#[derive(Debug, Deserialize)]
pub struct AddToCartBody {
    product_id: ProductId,
    #[serde(default = "one")]
    quantity: u32,
}

const fn one() -> u32 {
    1
}

pub async fn add_to_cart(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<AddToCartBody>,
) -> Response {
    let mut backend = lock(&shared);
    if backend.session_user(&headers).is_none() {
        return not_authenticated();
    }
    if body.quantity == 0 {
        return error(StatusCode::BAD_REQUEST, "error", "Quantity must be positive");
    }
    let Some(product) = backend.product(body.product_id) else {
        return not_found();
    };

    // One line per product: adding again merges quantities
    if let Some(line) = backend.cart.iter_mut().find(|l| l.product.id == product.id) {
        line.quantity += body.quantity;
        let line = line.clone();
        return (StatusCode::OK, Json(line)).into_response();
    }

    let line = CartItem {
        id: CartItemId::new(backend.next_id()),
        product,
        quantity: body.quantity,
        created_at: Utc::now(),
    };
    backend.cart.push(line.clone());
    (StatusCode::CREATED, Json(line)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityBody {
    action: QuantityAction,
}

pub async fn update_quantity(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateQuantityBody>,
) -> Response {
    let mut backend = lock(&shared);
    if backend.session_user(&headers).is_none() {
        return not_authenticated();
    }
    let id = CartItemId::new(id);
    let Some(index) = backend.cart.iter().position(|l| l.id == id) else {
        return not_found();
    };

    let Some(line) = backend.cart.get_mut(index) else {
        return not_found();
    };
    match body.action {
        QuantityAction::Increase => line.quantity += 1,
        QuantityAction::Decrease if line.quantity > 1 => line.quantity -= 1,
        QuantityAction::Decrease => {
            backend.cart.remove(index);
            return StatusCode::NO_CONTENT.into_response();
        }
    }

    let line = line.clone();
    Json(line).into_response()
}

pub async fn remove_from_cart(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut backend = lock(&shared);
    if backend.session_user(&headers).is_none() {
        return not_authenticated();
    }
    let id = CartItemId::new(id);
    let before = backend.cart.len();
    backend.cart.retain(|l| l.id != id);

    if backend.cart.len() == before {
        not_found()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

pub async fn clear_cart(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = lock(&shared);
    if backend.session_user(&headers).is_none() {
        return not_authenticated();
    }
    backend.cart.clear();
    StatusCode::NO_CONTENT.into_response()
}

// =============================================================================
// Orders
// =============================================================================

pub async fn orders(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    let backend = lock(&shared);
    if backend.session_user(&headers).is_none() {
        return not_authenticated();
    }
    let mut orders = backend.orders.clone();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Json(orders).into_response()
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderBody {
    #[serde(default)]
    payment_mode: PaymentMode,
}

pub async fn place_order(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<PlaceOrderBody>,
) -> Response {
    let mut backend = lock(&shared);
    if backend.session_user(&headers).is_none() {
        return not_authenticated();
    }
    if backend.cart.is_empty() {
        return error(StatusCode::BAD_REQUEST, "error", "Cart is empty");
    }

    let lines = std::mem::take(&mut backend.cart);
    let mut placed = Vec::with_capacity(lines.len());
    for line in lines {
        let order = Order {
            id: OrderId::new(backend.next_id()),
            price: line.product.price,
            product: line.product,
            quantity: line.quantity,
            payment_mode: body.payment_mode,
            is_cancelled: false,
            created_at: Utc::now(),
        };
        backend.orders.push(order.clone());
        placed.push(order);
    }

    (StatusCode::CREATED, Json(placed)).into_response()
}

pub async fn cancel_order(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut backend = lock(&shared);
    if backend.session_user(&headers).is_none() {
        return not_authenticated();
    }
    let id = OrderId::new(id);
    let Some(order) = backend.orders.iter_mut().find(|o| o.id == id) else {
        return not_found();
    };
    if order.is_cancelled {
        return error(StatusCode::BAD_REQUEST, "error", "Order already cancelled");
    }

    order.is_cancelled = true;
    Json(order.clone()).into_response()
}

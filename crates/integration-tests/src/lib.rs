//! End-to-end test support for the Shopfront client.
//!
//! [`FakeBackend`] is an in-process axum server that speaks the shop API:
//! session cookie login, a CSRF cookie issued from the API root and
//! enforced on unsafe methods, a product catalog, a cart and orders. Every
//! request it receives is recorded so tests can assert on exactly what the
//! client sent.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = FakeBackend::start().await;
//! let mut shop = backend.shop();
//!
//! shop.login(&fixtures::credentials()).await?;
//! shop.add_to_cart(ProductId::new(5)).await?;
//!
//! assert_eq!(backend.count(&Method::GET, "/api/cart/"), 2);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixtures;
mod routes;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Request, State},
    http::{StatusCode, request::Parts},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use shopfront_client::{ClientConfig, Shop};
use shopfront_core::{CartItem, MobileNumber, Order, Product, User};
use tower_http::trace::TraceLayer;
use url::form_urlencoded;

pub use axum::http::Method;

/// Name of the CSRF cookie the backend issues.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Name of the header unsafe requests must echo the CSRF cookie in.
pub const CSRF_HEADER: &str = "x-csrftoken";

/// Name of the session cookie set on login.
pub const SESSION_COOKIE: &str = "sessionid";

/// Largest request body the backend accepts.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// A request as the fake backend received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path without the query string, e.g. `/api/cart/`.
    pub path: String,
    pub query: Option<String>,
    /// Value of the CSRF header, if sent.
    pub csrf_header: Option<String>,
    /// JSON body, if the request carried one.
    pub body: Option<serde_json::Value>,
}

impl RecordedRequest {
    fn new(parts: &Parts, body: &Bytes) -> Self {
        Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(String::from),
            csrf_header: parts
                .headers
                .get(CSRF_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(String::from),
            body: serde_json::from_slice(body).ok(),
        }
    }

    /// Query parameters in the order they were sent.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|query| {
                form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// In-memory data and switches behind the fake backend.
pub(crate) struct Backend {
    pub(crate) products: Vec<Product>,
    pub(crate) users: HashMap<MobileNumber, User>,
    /// Active session token and the user it belongs to.
    pub(crate) session: Option<(String, User)>,
    pub(crate) cart: Vec<CartItem>,
    pub(crate) orders: Vec<Order>,
    pub(crate) csrf_token: String,
    pub(crate) issue_csrf_cookie: bool,
    pub(crate) sequence: i64,
    requests: Vec<RecordedRequest>,
    failures: HashMap<(Method, String), StatusCode>,
}

impl Backend {
    fn new() -> Self {
        Self {
            products: fixtures::products(),
            users: HashMap::new(),
            session: None,
            cart: Vec::new(),
            orders: Vec::new(),
            csrf_token: fixtures::CSRF_TOKEN.to_string(),
            issue_csrf_cookie: true,
            sequence: fixtures::FIRST_ID,
            requests: Vec::new(),
            failures: HashMap::new(),
        }
    }

    /// Next value of the shared id sequence.
    pub(crate) const fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }
}

type Shared = Arc<Mutex<Backend>>;

fn lock(shared: &Shared) -> MutexGuard<'_, Backend> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a running fake shop backend.
#[derive(Clone)]
pub struct FakeBackend {
    addr: SocketAddr,
    shared: Shared,
}

impl FakeBackend {
    /// Bind to an ephemeral local port and serve the shop API.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        init_tracing();

        let shared: Shared = Arc::new(Mutex::new(Backend::new()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener
            .local_addr()
            .expect("Failed to read fake backend address");

        let app = router(Arc::clone(&shared));
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Fake backend stopped");
            }
        });

        tracing::debug!(%addr, "Fake backend listening");
        Self { addr, shared }
    }

    /// Base URL of the API, without a trailing slash.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Client configuration pointing at this backend.
    ///
    /// # Panics
    ///
    /// Panics if the backend URL is rejected, which would be a bug here.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url()).expect("Fake backend URL is valid")
    }

    /// A fresh shop client with its own cookie jar and empty state.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn shop(&self) -> Shop {
        Shop::new(&self.config()).expect("Failed to build shop client")
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.shared).requests.clone()
    }

    /// Requests received for `method` and `path`.
    #[must_use]
    pub fn requests_to(&self, method: &Method, path: &str) -> Vec<RecordedRequest> {
        lock(&self.shared)
            .requests
            .iter()
            .filter(|request| request.method == *method && request.path == path)
            .cloned()
            .collect()
    }

    /// Number of requests received for `method` and `path`.
    #[must_use]
    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.requests_to(method, path).len()
    }

    /// Forget all recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.shared).requests.clear();
    }

    /// Answer every `method` request to `path` with `status` until cleared.
    pub fn fail(&self, method: &Method, path: &str, status: StatusCode) {
        lock(&self.shared)
            .failures
            .insert((method.clone(), path.to_string()), status);
    }

    /// Stop injecting failures.
    pub fn clear_failures(&self) {
        lock(&self.shared).failures.clear();
    }

    /// Whether `GET /api/` sets the CSRF cookie.
    pub fn set_issue_csrf_cookie(&self, issue: bool) {
        lock(&self.shared).issue_csrf_cookie = issue;
    }

    /// CSRF token currently issued by the backend.
    #[must_use]
    pub fn csrf_token(&self) -> String {
        lock(&self.shared).csrf_token.clone()
    }

    /// Token of the active session, if any.
    #[must_use]
    pub fn session_token(&self) -> Option<String> {
        lock(&self.shared)
            .session
            .as_ref()
            .map(|(token, _)| token.clone())
    }

    /// Drop the active session, as if it expired on the server.
    pub fn expire_session(&self) {
        lock(&self.shared).session = None;
    }

    /// Server-side cart contents.
    #[must_use]
    pub fn cart(&self) -> Vec<CartItem> {
        lock(&self.shared).cart.clone()
    }

    /// Server-side orders.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        lock(&self.shared).orders.clone()
    }
}

fn router(shared: Shared) -> Router {
    Router::new()
        .route("/api/", get(routes::root))
        .route("/api/auth/login/", post(routes::login))
        .route("/api/auth/logout/", post(routes::logout))
        .route("/api/auth/user/", get(routes::current_user))
        .route("/api/products/", get(routes::products))
        .route("/api/products/most_bought/", get(routes::most_bought))
        .route("/api/cart/", get(routes::cart).post(routes::add_to_cart))
        .route("/api/cart/clear/", delete(routes::clear_cart))
        .route("/api/cart/{id}/", delete(routes::remove_from_cart))
        .route("/api/cart/{id}/update_quantity/", post(routes::update_quantity))
        .route("/api/orders/", get(routes::orders).post(routes::place_order))
        .route("/api/orders/{id}/cancel/", post(routes::cancel_order))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&shared),
            check_csrf,
        ))
        .layer(middleware::from_fn_with_state(Arc::clone(&shared), record))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Record the request, then answer with an injected failure if one is set.
async fn record(State(shared): State<Shared>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let Ok(bytes) = axum::body::to_bytes(body, MAX_BODY_BYTES).await else {
        return StatusCode::PAYLOAD_TOO_LARGE.into_response();
    };

    let injected = {
        let mut backend = lock(&shared);
        backend.requests.push(RecordedRequest::new(&parts, &bytes));
        backend
            .failures
            .get(&(parts.method.clone(), parts.uri.path().to_string()))
            .copied()
    };
    if let Some(status) = injected {
        return routes::error(status, "error", "Injected failure");
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Reject unsafe requests whose CSRF header does not match the CSRF cookie.
async fn check_csrf(State(shared): State<Shared>, request: Request, next: Next) -> Response {
    if shopfront_client::http::is_unsafe(request.method()) {
        let cookie = routes::cookie(request.headers(), CSRF_COOKIE);
        let header = request
            .headers()
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok());
        let expected = lock(&shared).csrf_token.clone();

        let valid = cookie.as_deref() == Some(expected.as_str()) && header == Some(expected.as_str());
        if !valid {
            let reason = if cookie.is_none() {
                "CSRF Failed: CSRF cookie not set."
            } else {
                "CSRF Failed: CSRF token missing or incorrect."
            };
            return routes::error(StatusCode::FORBIDDEN, "detail", reason);
        }
    }

    next.run(request).await
}

/// Install a test subscriber once; honours `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

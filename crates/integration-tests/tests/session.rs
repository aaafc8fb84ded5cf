//! Login, logout, session re-checks and the router guard.

use reqwest::StatusCode;
use shopfront_client::{ErrorKind, LoginCredentials, Navigation, Route};
use shopfront_core::{MobileNumber, ProductId};
use shopfront_integration_tests::{FakeBackend, Method, fixtures};

#[tokio::test]
async fn test_login_stores_user_and_loads_cart() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();

    let response = shop
        .login(&fixtures::credentials().with_full_name("Priya Sharma"))
        .await
        .expect("login succeeds");

    assert_eq!(response.message, "Login successful");
    let user = shop.state().user().expect("user stored");
    assert_eq!(user.mobile.as_str(), fixtures::MOBILE);
    assert_eq!(user.full_name, "Priya Sharma");
    assert!(shop.state().is_authenticated());
    assert_eq!(backend.count(&Method::GET, "/api/cart/"), 1);
}

#[tokio::test]
async fn test_login_sends_credentials_once() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();

    shop.login(&fixtures::credentials())
        .await
        .expect("login succeeds");

    let logins = backend.requests_to(&Method::POST, "/api/auth/login/");
    assert_eq!(logins.len(), 1);
    let body = logins
        .first()
        .and_then(|request| request.body.clone())
        .expect("login has a JSON body");
    assert_eq!(body["mobile"], fixtures::MOBILE);
    assert_eq!(body["otp"], fixtures::OTP);
    assert!(body.get("full_name").is_none());
}

#[tokio::test]
async fn test_failed_login_is_returned_and_leaves_state_alone() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();

    let mobile = MobileNumber::parse(fixtures::MOBILE).expect("valid mobile");
    let err = shop
        .login(&LoginCredentials::new(mobile, "000000"))
        .await
        .expect_err("wrong OTP is rejected");

    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(err.kind(), ErrorKind::ClientSide);
    assert_eq!(err.user_message(), "Invalid OTP");
    assert!(shop.state().user().is_none());
    assert_eq!(backend.count(&Method::GET, "/api/cart/"), 0);
}

#[tokio::test]
async fn test_logout_clears_session_data() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();
    shop.login(&fixtures::credentials())
        .await
        .expect("login succeeds");
    shop.add_to_cart(ProductId::new(1))
        .await
        .expect("add succeeds");
    shop.fetch_orders().await;
    assert!(!shop.state().cart().is_empty());

    shop.logout().await;

    assert!(shop.state().user().is_none());
    assert!(shop.state().cart().is_empty());
    assert!(shop.state().orders().is_empty());
    assert_eq!(backend.count(&Method::POST, "/api/auth/logout/"), 1);
}

#[tokio::test]
async fn test_logout_clears_state_even_when_backend_fails() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();
    shop.login(&fixtures::credentials())
        .await
        .expect("login succeeds");
    shop.add_to_cart(ProductId::new(2))
        .await
        .expect("add succeeds");

    backend.fail(
        &Method::POST,
        "/api/auth/logout/",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    shop.logout().await;

    assert!(shop.state().user().is_none());
    assert!(shop.state().cart().is_empty());
    assert!(shop.state().orders().is_empty());
}

#[tokio::test]
async fn test_check_auth_restores_user_from_session_cookie() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();
    shop.login(&fixtures::credentials())
        .await
        .expect("login succeeds");

    assert!(shop.check_auth().await);
    assert!(shop.state().is_authenticated());

    let mut stranger = backend.shop();
    assert!(!stranger.check_auth().await);
    assert!(stranger.state().user().is_none());
}

#[tokio::test]
async fn test_check_auth_clears_user_when_session_expired() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();
    shop.login(&fixtures::credentials())
        .await
        .expect("login succeeds");

    backend.expire_session();

    assert!(!shop.check_auth().await);
    assert!(shop.state().user().is_none());
    assert!(shop.state().cart().is_empty());
}

#[tokio::test]
async fn test_guard_redirects_to_login_when_recheck_fails() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();

    let navigation = shop.navigate("/cart").await;

    assert_eq!(
        navigation,
        Navigation::Redirect {
            route: Route::Login,
            redirect: "/cart".to_string(),
        }
    );
    assert_eq!(navigation.location(), "/login?redirect=%2Fcart");
    assert_eq!(
        Route::redirect_target(&navigation.location()).as_deref(),
        Some("/cart")
    );
    assert_eq!(backend.count(&Method::GET, "/api/auth/user/"), 1);
}

#[tokio::test]
async fn test_guard_proceeds_after_successful_recheck() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();
    shop.login(&fixtures::credentials())
        .await
        .expect("login succeeds");

    // A second client holding the session cookie but no user in its store
    let mut returning = backend.shop();
    let session = backend.session_token().expect("session is active");
    returning
        .api()
        .http()
        .add_cookie(&format!("sessionid={session}; Path=/"));
    assert!(returning.state().user().is_none());

    let navigation = returning.navigate("/orders?page=2").await;

    assert!(navigation.is_proceed());
    assert_eq!(navigation.location(), "/orders?page=2");
    assert_eq!(backend.count(&Method::GET, "/api/auth/user/"), 1);
    assert!(returning.state().is_authenticated());
}

#[tokio::test]
async fn test_guard_skips_recheck_when_user_present() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();
    shop.login(&fixtures::credentials())
        .await
        .expect("login succeeds");

    assert!(shop.navigate("/cart").await.is_proceed());
    assert_eq!(backend.count(&Method::GET, "/api/auth/user/"), 0);
}

#[tokio::test]
async fn test_guard_ignores_public_routes() {
    let backend = FakeBackend::start().await;
    let mut shop = backend.shop();

    assert!(shop.navigate("/").await.is_proceed());
    assert!(shop.navigate("/login?redirect=%2Fcart").await.is_proceed());
    assert!(shop.navigate("/no-such-view").await.is_proceed());
    assert_eq!(backend.count(&Method::GET, "/api/auth/user/"), 0);
}

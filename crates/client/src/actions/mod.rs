//! Actions: asynchronous operations that call the API and commit the
//! results into the state store.
//!
//! Every action follows the same shape:
//!
//! 1. make sure a CSRF token exists (unsafe requests only)
//! 2. call one endpoint
//! 3. commit the response into one state field
//! 4. refresh dependent fields
//!
//! Read actions (`fetch_*`, `check_auth`, `logout`) log and swallow errors,
//! leaving the previous state in place. Write actions the UI must react to
//! (login, cart mutations, placing and cancelling orders) return the error.

mod auth;
mod cart;
mod orders;
mod products;

use tracing::debug;

use crate::error::{ClientError, add_breadcrumb};

/// Record a write action failure before handing the error back to the caller.
fn note_failure(action: &'static str, err: &ClientError) {
    debug!(action, error = %err, "Action failed");
    add_breadcrumb(
        "action",
        &format!("{action} failed"),
        Some(&[("error", err.to_string().as_str())]),
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use shopfront_core::{FiltersUpdate, MobileNumber, ProductId, User, UserId};

    use crate::{ClientConfig, ErrorKind, Navigation, Route, Shop};

    /// A shop whose API is unreachable: every request fails to connect.
    fn offline_shop() -> Shop {
        let config = ClientConfig::new("http://127.0.0.1:9/api").unwrap();
        Shop::new(&config).unwrap()
    }

    fn user() -> User {
        User {
            id: UserId::new(1),
            mobile: MobileNumber::parse("9999999999").unwrap(),
            full_name: String::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_read_failures_are_swallowed() {
        let mut shop = offline_shop();

        shop.apply_filters(FiltersUpdate::default().category("Shoes"))
            .await;
        shop.fetch_most_bought().await;
        shop.fetch_cart().await;
        shop.fetch_orders().await;

        assert!(shop.state().products().is_empty());
        assert!(!shop.state().loading());
        assert_eq!(shop.state().filters().category, "Shoes");
    }

    #[tokio::test]
    async fn test_write_failures_are_returned() {
        let mut shop = offline_shop();

        let err = shop.add_to_cart(ProductId::new(5)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_logout_clears_state_when_offline() {
        let mut shop = offline_shop();
        shop.state_mut().set_user(Some(user()));

        shop.logout().await;

        assert!(shop.state().user().is_none());
        assert!(shop.state().cart().is_empty());
        assert!(shop.state().orders().is_empty());
    }

    #[tokio::test]
    async fn test_guard_redirects_when_session_cannot_be_checked() {
        let mut shop = offline_shop();

        assert_eq!(
            shop.navigate("/orders").await,
            Navigation::Redirect {
                route: Route::Login,
                redirect: "/orders".to_string(),
            }
        );

        shop.state_mut().set_user(Some(user()));
        assert!(shop.navigate("/orders").await.is_proceed());
    }
}

//! Session actions.

use tracing::{info, instrument};

use super::note_failure;
use crate::Shop;
use crate::api::{LoginCredentials, LoginResponse};
use crate::error::{
    ErrorKind, Result, add_breadcrumb, clear_sentry_user, report_swallowed, set_sentry_user,
};

impl Shop {
    /// Log in, store the user and load their cart.
    ///
    /// # Errors
    ///
    /// Returns the API error if the login request fails; state is unchanged.
    #[instrument(skip(self, credentials), fields(mobile = %credentials.mobile))]
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<LoginResponse> {
        self.api().http().ensure_csrf().await;

        let response = self
            .api()
            .login(credentials)
            .await
            .inspect_err(|e| note_failure("login", e))?;

        set_sentry_user(&response.user.id, Some(response.user.mobile.as_str()));
        add_breadcrumb("auth", "Logged in", None);
        info!(user_id = %response.user.id, "Logged in");

        self.state_mut().set_user(Some(response.user.clone()));
        self.fetch_cart().await;

        Ok(response)
    }

    /// End the session. User, cart and orders are cleared locally even when
    /// the backend call fails.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        self.api().http().ensure_csrf().await;

        match self.api().logout().await {
            Ok(_) => info!("Logged out"),
            Err(e) => report_swallowed("logout", &e),
        }

        self.state_mut().clear_user();
        clear_sentry_user();
    }

    /// Re-check the session against the backend. Stores the user on success
    /// and clears session data on failure. Returns whether the session is
    /// authenticated afterwards.
    #[instrument(skip(self))]
    pub async fn check_auth(&mut self) -> bool {
        match self.api().current_user().await {
            Ok(user) => {
                set_sentry_user(&user.id, Some(user.mobile.as_str()));
                self.state_mut().set_user(Some(user));
            }
            Err(e) => {
                if e.kind() == ErrorKind::ClientSide {
                    info!(error = %e, "Session is not authenticated");
                } else {
                    report_swallowed("check_auth", &e);
                }
                self.state_mut().clear_user();
            }
        }

        self.state().is_authenticated()
    }
}

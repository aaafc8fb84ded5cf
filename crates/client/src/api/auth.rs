//! Session endpoints.

use shopfront_core::User;
use tracing::instrument;

use super::{LoginCredentials, LoginRequest, LoginResponse, MessageResponse, ShopApi};
use crate::error::Result;

impl ShopApi {
    /// Log in with a mobile number and OTP. The backend answers with the
    /// user and sets the session cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, credentials), fields(mobile = %credentials.mobile))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse> {
        let body = LoginRequest::from(credentials);
        self.http.post("auth/login/", Some(&body)).await
    }

    /// End the server-side session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<MessageResponse> {
        self.http.post("auth/logout/", None::<&()>).await
    }

    /// User bound to the current session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is not authenticated.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User> {
        self.http.get("auth/user/", &[]).await
    }
}

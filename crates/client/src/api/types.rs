//! Request and response bodies of the shop API.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shopfront_core::{MobileNumber, PaymentMode, ProductId, QuantityAction, User};

/// Credentials for the mobile/OTP login.
#[derive(Clone)]
pub struct LoginCredentials {
    pub mobile: MobileNumber,
    pub otp: SecretString,
    /// Name to register the user under on first login.
    pub full_name: Option<String>,
}

impl LoginCredentials {
    #[must_use]
    pub fn new(mobile: MobileNumber, otp: impl Into<String>) -> Self {
        Self {
            mobile,
            otp: SecretString::from(otp.into()),
            full_name: None,
        }
    }

    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("mobile", &self.mobile)
            .field("otp", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Wire body of `POST auth/login/`.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub mobile: &'a str,
    pub otp: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<&'a str>,
}

impl<'a> From<&'a LoginCredentials> for LoginRequest<'a> {
    fn from(credentials: &'a LoginCredentials) -> Self {
        Self {
            mobile: credentials.mobile.as_str(),
            otp: credentials.otp.expose_secret(),
            full_name: credentials.full_name.as_deref(),
        }
    }
}

/// Response of `POST auth/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    #[serde(default)]
    pub message: String,
}

/// Plain `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Wire body of `POST cart/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Wire body of `POST cart/{id}/update_quantity/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuantityRequest {
    pub action: QuantityAction,
}

/// Wire body of `POST orders/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub payment_mode: PaymentMode,
}

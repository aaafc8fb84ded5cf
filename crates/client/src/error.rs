//! Unified error handling with Sentry integration.
//!
//! Every network-facing operation returns `Result<T, ClientError>`. Read-path
//! actions log and report the error to Sentry before swallowing it; write-path
//! actions hand it back to the caller unmodified.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Error raised by the HTTP client and the typed API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failed before a response arrived.
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error: {status} - {body}")]
    Http {
        /// Response status.
        status: StatusCode,
        /// Response body, truncated.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An endpoint path could not be resolved against the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The client could not be configured.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection, DNS, TLS or timeout failure.
    Network,
    /// HTTP 4xx: validation, authentication or CSRF rejection.
    ClientSide,
    /// HTTP 5xx.
    ServerSide,
    /// Anything else (decode, URL, configuration, unexpected status).
    Other,
}

impl ClientError {
    /// Classify the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Http { status, .. } if status.is_client_error() => ErrorKind::ClientSide,
            Self::Http { status, .. } if status.is_server_error() => ErrorKind::ServerSide,
            _ => ErrorKind::Other,
        }
    }

    /// HTTP status of the failed response, if one arrived.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            _ => None,
        }
    }

    /// Message suitable for showing to a user.
    ///
    /// Uses the backend's `error`, `detail` or `message` field when the body is
    /// a JSON object carrying one, and falls back to the error's display text.
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Self::Http { body, .. } = self
            && let Ok(serde_json::Value::Object(fields)) =
                serde_json::from_str::<serde_json::Value>(body)
        {
            for key in ["error", "detail", "message"] {
                if let Some(serde_json::Value::String(message)) = fields.get(key) {
                    return message.clone();
                }
            }
        }
        self.to_string()
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Log and report an error that an action swallows.
pub(crate) fn report_swallowed(action: &'static str, err: &ClientError) {
    let event_id = sentry::capture_error(err);
    tracing::warn!(
        action,
        error = %err,
        sentry_event_id = %event_id,
        "Action failed; keeping previous state"
    );
}

/// Set the Sentry user context after a successful login.
pub fn set_sentry_user(user_id: &impl ToString, mobile: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: mobile.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", Some(&[("product_id", "5")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> ClientError {
        ClientError::Http {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::IM_A_TEAPOT),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_error_display() {
        let err = http(400, "{\"error\": \"Cart is empty\"}");
        assert_eq!(
            err.to_string(),
            "API error: 400 Bad Request - {\"error\": \"Cart is empty\"}"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(http(403, "").kind(), ErrorKind::ClientSide);
        assert_eq!(http(404, "").kind(), ErrorKind::ClientSide);
        assert_eq!(http(500, "").kind(), ErrorKind::ServerSide);
        assert_eq!(http(503, "").kind(), ErrorKind::ServerSide);
        assert_eq!(http(302, "").kind(), ErrorKind::Other);
        assert_eq!(
            ClientError::from(url::ParseError::EmptyHost).kind(),
            ErrorKind::Other
        );
    }

    #[test]
    fn test_status() {
        assert_eq!(http(400, "").status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            ClientError::from(url::ParseError::EmptyHost).status(),
            None
        );
    }

    #[test]
    fn test_user_message_prefers_backend_text() {
        assert_eq!(
            http(400, "{\"error\": \"Order already cancelled\"}").user_message(),
            "Order already cancelled"
        );
        assert_eq!(
            http(403, "{\"detail\": \"CSRF Failed: CSRF token missing.\"}").user_message(),
            "CSRF Failed: CSRF token missing."
        );
        assert_eq!(
            http(502, "<html>bad gateway</html>").user_message(),
            "API error: 502 Bad Gateway - <html>bad gateway</html>"
        );
    }
}

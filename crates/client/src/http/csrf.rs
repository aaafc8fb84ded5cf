//! CSRF credential provider and bootstrap.
//!
//! The backend uses the double-submit cookie pattern: it sets a CSRF cookie
//! and rejects unsafe requests that do not echo the cookie's value in a
//! header. [`CsrfTokenProvider`] makes the source of that value explicit, and
//! [`HttpClient::ensure_csrf`] primes the cookie before a write.

use std::sync::Arc;

use reqwest::Method;
use reqwest::cookie::{CookieStore, Jar};
use tracing::{debug, instrument};
use url::Url;

use super::HttpClient;
use crate::error::Result;

/// Source of the CSRF token the interceptor echoes on unsafe requests.
pub trait CsrfTokenProvider: Send + Sync {
    /// Current token, or `None` if the client has not been issued one yet.
    fn csrf_token(&self) -> Option<String>;
}

/// Reads the CSRF token from the client's cookie jar.
pub struct CookieJarTokens {
    jar: Arc<Jar>,
    url: Url,
    cookie_name: String,
}

impl CookieJarTokens {
    /// Read cookie `cookie_name` as it would be sent to `url`.
    #[must_use]
    pub const fn new(jar: Arc<Jar>, url: Url, cookie_name: String) -> Self {
        Self {
            jar,
            url,
            cookie_name,
        }
    }
}

impl CsrfTokenProvider for CookieJarTokens {
    fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.url)?;
        let header = header.to_str().ok()?;
        cookie_value(header, &self.cookie_name)
    }
}

/// Extract a cookie's value from a `Cookie` header (`a=1; b=2`).
///
/// Empty values count as absent.
#[must_use]
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

impl HttpClient {
    /// Make sure a CSRF token is available before an unsafe request.
    ///
    /// If none is present, issue one safe `GET` to the API root so the backend
    /// sets the cookie. Failure of that request is logged and ignored; if the
    /// backend still rejects the following write, that error surfaces there.
    #[instrument(skip(self))]
    pub async fn ensure_csrf(&self) {
        if self.csrf_token().is_some() {
            return;
        }

        match self.prime_csrf().await {
            Ok(()) if self.csrf_token().is_some() => debug!("CSRF cookie primed"),
            Ok(()) => debug!("CSRF priming request did not set a token"),
            Err(e) => debug!(error = %e, "CSRF priming request failed"),
        }
    }

    async fn prime_csrf(&self) -> Result<()> {
        self.send(Method::GET, "", &[], None::<&()>).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let header = "sessionid=xyz; csrftoken=abc123; theme=dark";
        assert_eq!(cookie_value(header, "csrftoken").as_deref(), Some("abc123"));
        assert_eq!(cookie_value(header, "sessionid").as_deref(), Some("xyz"));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn test_cookie_value_requires_exact_name() {
        let header = "xcsrftoken=nope;csrftoken2=nope";
        assert_eq!(cookie_value(header, "csrftoken"), None);
    }

    #[test]
    fn test_cookie_value_ignores_empty_and_malformed() {
        assert_eq!(cookie_value("csrftoken=", "csrftoken"), None);
        assert_eq!(cookie_value("csrftoken", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
        assert_eq!(
            cookie_value("csrftoken=\"quoted\"", "csrftoken").as_deref(),
            Some("quoted")
        );
    }

    #[test]
    fn test_jar_provider_scopes_cookies_to_url() {
        let jar = Arc::new(Jar::default());
        let api: Url = "http://shop.test/api/".parse().unwrap();
        let other: Url = "http://elsewhere.test/".parse().unwrap();
        jar.add_cookie_str("csrftoken=tok; Path=/", &other);

        let tokens = CookieJarTokens::new(Arc::clone(&jar), api.clone(), "csrftoken".to_string());
        assert_eq!(tokens.csrf_token(), None);

        jar.add_cookie_str("csrftoken=tok; Path=/", &api);
        assert_eq!(tokens.csrf_token().as_deref(), Some("tok"));
    }
}

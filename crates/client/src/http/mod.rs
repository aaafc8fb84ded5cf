//! Shared HTTP client for the shop API.
//!
//! # Architecture
//!
//! - One `reqwest::Client` per [`HttpClient`], cheaply cloneable via `Arc`
//! - A cookie jar attached to the client: the session and CSRF cookies set
//!   by the backend are forwarded on every request
//! - A request interceptor that adds the CSRF header to unsafe requests
//!   (POST, PUT, PATCH, DELETE) when the injected [`CsrfTokenProvider`]
//!   has a token
//! - Errors are returned to the caller unmodified; there is no retry
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_client::{ClientConfig, http::HttpClient};
//!
//! let client = HttpClient::new(&ClientConfig::from_env()?)?;
//! client.ensure_csrf().await;
//! let cart: Vec<CartItem> = client.get("cart/", &[]).await?;
//! ```

pub mod csrf;

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::HeaderName;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};
use url::Url;

pub use csrf::{CookieJarTokens, CsrfTokenProvider};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Longest slice of an error response body kept in [`ClientError::Http`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Client for the shop REST API.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

struct HttpClientInner {
    client: reqwest::Client,
    base_url: Url,
    jar: Arc<Jar>,
    csrf_header: HeaderName,
    csrf: Arc<dyn CsrfTokenProvider>,
}

impl HttpClient {
    /// Create a client whose CSRF token is read from its own cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let tokens = CookieJarTokens::new(
            Arc::clone(&jar),
            config.api_url.clone(),
            config.csrf.cookie_name.clone(),
        );
        Self::with_token_provider(config, jar, Arc::new(tokens))
    }

    /// Create a client with an explicit cookie jar and CSRF token provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn with_token_provider(
        config: &ClientConfig,
        jar: Arc<Jar>,
        csrf: Arc<dyn CsrfTokenProvider>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder().cookie_provider(Arc::clone(&jar));
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder.build()?;

        Ok(Self {
            inner: Arc::new(HttpClientInner {
                client,
                base_url: config.api_url.clone(),
                jar,
                csrf_header: config.csrf.header_name.clone(),
                csrf,
            }),
        })
    }

    /// Base URL every path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Current CSRF token, if the provider has one.
    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        self.inner.csrf.csrf_token()
    }

    /// Store a `Set-Cookie` style string in the jar for the base URL.
    pub fn add_cookie(&self, cookie: &str) {
        self.inner.jar.add_cookie_str(cookie, &self.inner.base_url);
    }

    /// Resolve an endpoint path (with or without a leading `/`) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status or unexpected JSON.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let text = self.send(Method::GET, path, query, None::<&()>).await?;
        decode(&text)
    }

    /// `POST` an optional JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status or unexpected JSON.
    pub async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let text = self.send(Method::POST, path, &[], body).await?;
        decode(&text)
    }

    /// `DELETE` a resource, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, &[], None::<&()>).await?;
        Ok(())
    }

    /// Send a request and return the raw response body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` on transport failure and
    /// `ClientError::Http` for a non-success status.
    #[instrument(skip(self, query, body), fields(method = %method, path = %path))]
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<String>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint(path)?;
        let mut request = self.inner.client.request(method.clone(), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let request = self.intercept(&method, request);

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!(
                status = %status,
                body = %text.chars().take(MAX_ERROR_BODY_CHARS).collect::<String>(),
                "Shop API returned non-success status"
            );
            return Err(ClientError::Http {
                status,
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        debug!(status = %status, bytes = text.len(), "Shop API response");
        Ok(text)
    }

    /// Request interceptor: echo the CSRF token on unsafe methods.
    fn intercept(&self, method: &Method, request: RequestBuilder) -> RequestBuilder {
        if !is_unsafe(method) {
            return request;
        }

        match self.csrf_token() {
            Some(token) => {
                trace!("Attaching CSRF header");
                request.header(self.inner.csrf_header.clone(), token)
            }
            None => {
                trace!("No CSRF token available");
                request
            }
        }
    }
}

/// Methods that change server state and therefore need the CSRF header.
#[must_use]
pub fn is_unsafe(method: &Method) -> bool {
    !matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

/// Decode a response body; an empty body decodes as JSON `null`.
fn decode<T: DeserializeOwned>(text: &str) -> Result<T> {
    let text = if text.trim().is_empty() { "null" } else { text };
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::de::IgnoredAny;

    use super::*;

    #[test]
    fn test_unsafe_methods() {
        assert!(is_unsafe(&Method::POST));
        assert!(is_unsafe(&Method::PUT));
        assert!(is_unsafe(&Method::PATCH));
        assert!(is_unsafe(&Method::DELETE));
        assert!(!is_unsafe(&Method::GET));
        assert!(!is_unsafe(&Method::HEAD));
        assert!(!is_unsafe(&Method::OPTIONS));
    }

    #[test]
    fn test_decode_empty_body() {
        let _: IgnoredAny = decode("").unwrap();
        let value: Option<u32> = decode("  ").unwrap();
        assert_eq!(value, None);
        let value: Vec<u32> = decode("[1, 2]").unwrap();
        assert_eq!(value, vec![1, 2]);
        assert!(decode::<Vec<u32>>("{").is_err());
    }

    #[test]
    fn test_endpoint_resolution() {
        let config = ClientConfig::new("http://localhost:8000/api").unwrap();
        let client = HttpClient::new(&config).unwrap();

        assert_eq!(
            client.endpoint("/cart/7/update_quantity/").unwrap().as_str(),
            "http://localhost:8000/api/cart/7/update_quantity/"
        );
        assert_eq!(
            client.endpoint("").unwrap().as_str(),
            "http://localhost:8000/api/"
        );
    }

    #[test]
    fn test_csrf_token_comes_from_cookie_jar() {
        let config = ClientConfig::new("http://localhost:8000/api/").unwrap();
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.csrf_token(), None);

        client.add_cookie("csrftoken=abc123; Path=/");
        assert_eq!(client.csrf_token().as_deref(), Some("abc123"));
    }
}

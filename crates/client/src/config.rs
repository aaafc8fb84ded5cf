//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_API_URL` - Base URL of the shop API (default: `https://priya2625.pythonanywhere.com/api`)
//! - `SHOPFRONT_CSRF_COOKIE` - Cookie carrying the CSRF token (default: `csrftoken`)
//! - `SHOPFRONT_CSRF_HEADER` - Header the CSRF token is echoed in (default: `X-CSRFToken`)
//! - `SHOPFRONT_USER_AGENT` - `User-Agent` sent with every request
//! - `SHOPFRONT_LOG_FORMAT` - `pretty` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use reqwest::header::HeaderName;
use thiserror::Error;
use url::Url;

/// Default base URL of the shop API.
pub const DEFAULT_API_URL: &str = "https://priya2625.pythonanywhere.com/api";

/// Default name of the cookie holding the CSRF token.
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";

/// Default name of the header the CSRF token is sent in.
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid API URL {0}: {1}")]
    InvalidApiUrl(String, String),
}

/// Shop API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is resolved against (always ends in `/`)
    pub api_url: Url,
    /// CSRF cookie/header names
    pub csrf: CsrfConfig,
    /// Optional `User-Agent` header value
    pub user_agent: Option<String>,
    /// Logging and error tracking configuration
    pub telemetry: TelemetryConfig,
}

/// Names used by the CSRF double-submit cookie pattern.
#[derive(Debug, Clone)]
pub struct CsrfConfig {
    /// Cookie the server stores the token in
    pub cookie_name: String,
    /// Header unsafe requests echo the token in
    pub header_name: HeaderName,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_CSRF_COOKIE.to_string(),
            header_name: HeaderName::from_static("x-csrftoken"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging and error tracking configuration.
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ClientConfig {
    /// Build a configuration for `api_url` with every other setting at its default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidApiUrl` if the URL does not parse or is not http(s).
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            csrf: CsrfConfig::default(),
            user_agent: None,
            telemetry: TelemetryConfig::default(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = get("SHOPFRONT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&api_url)?;

        let cookie_name =
            get("SHOPFRONT_CSRF_COOKIE").unwrap_or_else(|| DEFAULT_CSRF_COOKIE.to_string());
        if cookie_name.is_empty() || cookie_name.contains(['=', ';', ' ']) {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_CSRF_COOKIE".to_string(),
                format!("not a valid cookie name: {cookie_name:?}"),
            ));
        }

        let header_name =
            get("SHOPFRONT_CSRF_HEADER").unwrap_or_else(|| DEFAULT_CSRF_HEADER.to_string());
        let header_name = HeaderName::from_bytes(header_name.as_bytes()).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPFRONT_CSRF_HEADER".to_string(), e.to_string())
        })?;

        let log_format = match get("SHOPFRONT_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SHOPFRONT_LOG_FORMAT".to_string(),
                    format!("expected 'pretty' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            api_url,
            csrf: CsrfConfig {
                cookie_name,
                header_name,
            },
            user_agent: get("SHOPFRONT_USER_AGENT"),
            telemetry: TelemetryConfig {
                log_format,
                sentry_dsn: get("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
                sentry_environment: get("SENTRY_ENVIRONMENT"),
            },
        })
    }

    /// Replace the API URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidApiUrl` if the URL does not parse or is not http(s).
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(api_url)?;
        Ok(self)
    }
}

/// Parse the API base URL, forcing a trailing slash so relative endpoint
/// paths resolve underneath it.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidApiUrl(raw.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiUrl(
            raw.to_string(),
            "scheme must be http or https".to_string(),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

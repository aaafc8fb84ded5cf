//! Router guard for protected views.
//!
//! Navigation to a route that requires authentication proceeds when the
//! store holds a user. Otherwise the guard re-checks the session with the
//! backend; if that fails it redirects to the login view and keeps the
//! intended destination in the `redirect` query parameter so the UI can
//! return there after logging in.

use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::Shop;

/// Query parameter carrying the destination through the login view.
pub const REDIRECT_PARAM: &str = "redirect";

/// Views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Cart,
    Orders,
}

impl Route {
    pub const ALL: [Self; 4] = [Self::Home, Self::Login, Self::Cart, Self::Orders];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Cart => "/cart",
            Self::Orders => "/orders",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Cart => "Cart",
            Self::Orders => "Orders",
        }
    }

    /// Whether the view is only reachable with an authenticated session.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        matches!(self, Self::Cart | Self::Orders)
    }

    /// Resolve a full path (query and fragment allowed) to a route.
    #[must_use]
    pub fn from_path(full_path: &str) -> Option<Self> {
        let path = full_path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Destination preserved in a login location such as `/login?redirect=%2Fcart`.
    #[must_use]
    pub fn redirect_target(location: &str) -> Option<String> {
        let (_, query) = location.split_once('?')?;
        let query = query.split('#').next().unwrap_or_default();

        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == REDIRECT_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| value.starts_with('/') && !value.starts_with("//"))
    }
}

/// Outcome of a guarded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Navigation continues to the requested path.
    Proceed {
        /// The requested full path.
        path: String,
    },
    /// Navigation is diverted.
    Redirect {
        /// Where navigation goes instead.
        route: Route,
        /// The originally requested full path.
        redirect: String,
    },
}

impl Navigation {
    /// Location to render, with the preserved destination in the query.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::Proceed { path } => path.clone(),
            Self::Redirect { route, redirect } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(REDIRECT_PARAM, redirect)
                    .finish();
                format!("{}?{query}", route.path())
            }
        }
    }

    #[must_use]
    pub const fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed { .. })
    }
}

/// Decide a navigation to `full_path`, re-checking the session when the
/// target is protected and the store holds no user.
#[instrument(skip(shop))]
pub async fn guard(shop: &mut Shop, full_path: &str) -> Navigation {
    let proceed = Navigation::Proceed {
        path: full_path.to_string(),
    };

    let Some(route) = Route::from_path(full_path) else {
        return proceed;
    };
    if !route.requires_auth() || shop.state().is_authenticated() {
        return proceed;
    }

    debug!(route = route.name(), "Protected route without user; re-checking session");
    if shop.check_auth().await {
        proceed
    } else {
        Navigation::Redirect {
            route: Route::Login,
            redirect: full_path.to_string(),
        }
    }
}

impl Shop {
    /// Run the router guard for a navigation to `full_path`.
    pub async fn navigate(&mut self, full_path: &str) -> Navigation {
        guard(self, full_path).await
    }
}

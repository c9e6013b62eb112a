//! Redirect decision policy.
//!
//! Pure: reads a pathname and an event, answers whether this context has to be
//! sent to the login page. Routes that are already public (the login page and
//! its neighbours) are exempt so a redirect can't loop back onto itself.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use crate::error::ConfigError;
use crate::event::AuthSyncEvent;
use crate::return_path::ReturnPath;

/// Routes exempt from forced login redirects unless configured otherwise.
pub const DEFAULT_PUBLIC_ROUTES: &[&str] = &["/login", "/signup", "/auth", "/reset-password"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectPolicy {
    public_routes: Vec<String>,
}

impl RedirectPolicy {
    /// Build a policy from an explicit route list. `login_route` is always exempt.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPublicRoute`] for entries that are not
    /// absolute single-slash paths.
    pub fn new<S: AsRef<str>>(login_route: &ReturnPath, public_routes: &[S]) -> Result<Self, ConfigError> {
        let mut routes = Vec::with_capacity(public_routes.len() + 1);
        for route in public_routes {
            let route = route.as_ref().trim();
            if !route.starts_with('/') || route.starts_with("//") {
                return Err(ConfigError::InvalidPublicRoute(route.to_owned()));
            }
            push_unique(&mut routes, trim_trailing_slash(route));
        }
        push_unique(&mut routes, trim_trailing_slash(login_route.path()));
        Ok(Self { public_routes: routes })
    }

    /// [`DEFAULT_PUBLIC_ROUTES`] plus `login_route`.
    #[must_use]
    pub fn with_default_routes(login_route: &ReturnPath) -> Self {
        let mut routes = Vec::with_capacity(DEFAULT_PUBLIC_ROUTES.len() + 1);
        for route in DEFAULT_PUBLIC_ROUTES {
            push_unique(&mut routes, trim_trailing_slash(route));
        }
        push_unique(&mut routes, trim_trailing_slash(login_route.path()));
        Self { public_routes: routes }
    }

    #[must_use]
    pub fn public_routes(&self) -> &[String] {
        &self.public_routes
    }

    /// Whether a context sitting on `pathname` must be force-navigated to login.
    ///
    /// Both events share one answer today; they stay distinct so callers can
    /// still tell an explicit sign-out from an expiry.
    #[must_use]
    pub fn should_force_login_redirect(&self, pathname: &str, event: AuthSyncEvent) -> bool {
        match event {
            AuthSyncEvent::SignedOut | AuthSyncEvent::SessionExpired => !self.is_public_route(pathname),
        }
    }

    /// Whether `pathname` equals a public route or sits below one.
    #[must_use]
    pub fn is_public_route(&self, pathname: &str) -> bool {
        let pathname = trim_trailing_slash(pathname);
        self.public_routes.iter().any(|route| route_matches(route, pathname))
    }
}

fn push_unique(routes: &mut Vec<String>, route: &str) {
    if !routes.iter().any(|r| r == route) {
        routes.push(route.to_owned());
    }
}

fn route_matches(route: &str, pathname: &str) -> bool {
    if route == "/" {
        return pathname == "/";
    }
    pathname == route || pathname.strip_prefix(route).is_some_and(|rest| rest.starts_with('/'))
}

fn trim_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

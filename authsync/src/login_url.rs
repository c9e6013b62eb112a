//! Login URL construction.
//!
//! Contract with the login page: `returnTo` (always a sanitized same-origin
//! path), optional `error`, optional `provider`.

#[cfg(test)]
#[path = "login_url_test.rs"]
mod login_url_test;

use url::form_urlencoded;

use crate::config::SyncConfig;
use crate::event::AuthSyncEvent;
use crate::return_path::{ReturnPath, sanitize_return_to};

pub const RETURN_TO_PARAM: &str = "returnTo";
pub const ERROR_PARAM: &str = "error";
pub const PROVIDER_PARAM: &str = "provider";
/// Path under which identity-provider sign-in flows start.
pub const PROVIDER_SIGN_IN_PREFIX: &str = "/auth";

/// Optional hints forwarded to the login page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginHints {
    pub error: Option<String>,
    pub provider: Option<String>,
}

impl LoginHints {
    /// Hints for a redirect forced by `event`.
    #[must_use]
    pub fn for_event(event: AuthSyncEvent, provider: Option<&str>) -> Self {
        Self {
            error: event.login_error_hint().map(str::to_owned),
            provider: provider.map(str::to_owned),
        }
    }
}

/// Join a pathname with a `location.search`-style query (leading `?` optional).
#[must_use]
pub fn join_path_and_search(path: &str, search: &str) -> String {
    let query = search.strip_prefix('?').unwrap_or(search);
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{query}")
    }
}

/// The return path a login redirect would carry for the given location.
#[must_use]
pub fn return_path_for(config: &SyncConfig, current_path: &str, current_search: &str) -> ReturnPath {
    let candidate = join_path_and_search(current_path, current_search);
    sanitize_return_to(Some(&candidate), &config.default_landing)
}

/// Build the login URL for a context currently at `current_path` + `current_search`.
#[must_use]
pub fn build_login_url(config: &SyncConfig, current_path: &str, current_search: &str, hints: &LoginHints) -> String {
    let return_to = return_path_for(config, current_path, current_search);
    login_url_with_return_to(config, &return_to, hints)
}

/// Build the login URL for an already-sanitized return path.
#[must_use]
pub fn login_url_with_return_to(config: &SyncConfig, return_to: &ReturnPath, hints: &LoginHints) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair(RETURN_TO_PARAM, return_to.as_str());
    if let Some(error) = non_blank(hints.error.as_deref()) {
        query.append_pair(ERROR_PARAM, error);
    }
    if let Some(provider) = non_blank(hints.provider.as_deref()) {
        query.append_pair(PROVIDER_PARAM, provider);
    }
    format!("{}?{}", config.login_route.path(), query.finish())
}

/// Sign-in entry point for `provider`, carrying `return_to` through the
/// provider round trip.
///
/// Returns `None` unless `provider` is a plain slug (ASCII letters, digits,
/// `-`, `_`), since it becomes a path segment.
#[must_use]
pub fn provider_sign_in_url(provider: &str, return_to: &ReturnPath) -> Option<String> {
    let provider = provider.trim();
    let is_slug = !provider.is_empty() && provider.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if !is_slug {
        return None;
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(RETURN_TO_PARAM, return_to.as_str())
        .finish();
    Some(format!("{PROVIDER_SIGN_IN_PREFIX}/{}?{query}", provider.to_ascii_lowercase()))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

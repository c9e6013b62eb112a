//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical unauthenticated redirect behavior, and
//! every sign-out button goes through [`sign_out`] so the identity hub hears
//! about it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use authsync::{IdentityHub, LoginHints, SyncConfig, build_login_url};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthState;

/// Whether a guarded route should send this user to the login page.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Login URL for a guarded route at `path` + `search`, carrying the
/// sanitized location as `returnTo`.
pub fn unauth_login_url(config: &SyncConfig, path: &str, search: &str) -> String {
    build_login_url(config, path, search, &LoginHints::default())
}

/// Redirect to the login page whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, config: SyncConfig, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = use_location();
    Effect::new(move || {
        let state = auth.get();
        if should_redirect_unauth(&state) {
            let url = unauth_login_url(&config, &location.pathname.get_untracked(), &location.search.get_untracked());
            navigate(&url, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// End the session, clear local auth state and report the sign-out.
///
/// The server call is best effort: local state is cleared either way so the
/// user is never shown as signed in after asking to leave.
pub async fn sign_out(auth: RwSignal<AuthState>, hub: IdentityHub) {
    if let Err(e) = crate::net::api::logout().await {
        leptos::logging::warn!("logout request failed: {e}");
    }
    if let Some(notification) = auth.try_update(AuthState::sign_out) {
        hub.emit(notification);
    }
}

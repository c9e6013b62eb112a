//! Login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every forced redirect lands here with `returnTo` (and sometimes `error` or
//! `provider`). The page re-sanitizes `returnTo`, since the query string is
//! user-controlled, and threads it through the identity-provider round trip.
//! A user who is already signed in is sent straight on to the target.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use authsync::event::SESSION_EXPIRED_HINT;
use authsync::login_url::{ERROR_PARAM, PROVIDER_PARAM, RETURN_TO_PARAM};
use authsync::{ReturnPath, SyncConfig, as_single_param_value, provider_sign_in_url, sanitize_return_to};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::state::auth::AuthState;

/// Providers offered when the redirect did not name one.
pub const DEFAULT_PROVIDERS: &[&str] = &["kakao", "naver", "google"];

/// Parsed and sanitized login query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginParams {
    pub return_to: ReturnPath,
    pub notice: Option<&'static str>,
    pub provider: Option<String>,
}

/// Read the login query. Each parameter counts only when it appears exactly
/// once; repeated parameters are treated as absent.
pub fn read_login_params<S: AsRef<str>>(config: &SyncConfig, return_to: &[S], error: &[S], provider: &[S]) -> LoginParams {
    LoginParams {
        return_to: sanitize_return_to(as_single_param_value(return_to), &config.default_landing),
        notice: error_notice(as_single_param_value(error)),
        provider: as_single_param_value(provider)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned),
    }
}

/// User-facing message for an `error` code.
pub fn error_notice(code: Option<&str>) -> Option<&'static str> {
    match code.map(str::trim) {
        None | Some("") => None,
        Some(SESSION_EXPIRED_HINT) => Some("Your session has expired. Please sign in again."),
        Some(_) => Some("Sign-in did not complete. Please try again."),
    }
}

/// `(provider, href)` pairs to render. A named provider (from the query, else
/// the configured hint) is offered alone; otherwise every default is.
pub fn provider_links(params: &LoginParams, hint: Option<&str>) -> Vec<(String, String)> {
    let named = params.provider.as_deref().or(hint);
    let candidates: Vec<&str> = match named {
        Some(provider) => vec![provider],
        None => DEFAULT_PROVIDERS.to_vec(),
    };
    let links: Vec<(String, String)> = candidates
        .into_iter()
        .filter_map(|p| provider_sign_in_url(p, &params.return_to).map(|href| (p.to_ascii_lowercase(), href)))
        .collect();
    if links.is_empty() && named.is_some() {
        return provider_links(&LoginParams { provider: None, ..params.clone() }, None);
    }
    links
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<SyncConfig>();
    let query = use_query_map();
    let navigate = use_navigate();
    let hint = config.provider_hint.clone();

    let params = Memo::new(move |_| {
        let q = query.get();
        let values = |key: &str| q.get_all(key).unwrap_or_default();
        read_login_params(&config, &values(RETURN_TO_PARAM), &values(ERROR_PARAM), &values(PROVIDER_PARAM))
    });

    // Already signed in (e.g. another tab finished the flow): go on.
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.user.is_some() {
            let target = params.get_untracked().return_to;
            navigate(target.as_str(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign in"</h1>
                <Show when=move || params.get().notice.is_some()>
                    <p class="login-message">{move || params.get().notice.unwrap_or_default()}</p>
                </Show>
                <div class="login-providers">
                    {move || {
                        provider_links(&params.get(), hint.as_deref())
                            .into_iter()
                            .map(|(provider, href)| {
                                view! {
                                    <a class="login-button" rel="external" href=href>
                                        {format!("Continue with {provider}")}
                                    </a>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </div>
        </div>
    }
}

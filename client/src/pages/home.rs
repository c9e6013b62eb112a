//! Signed-in landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stands in for every guarded route: it installs the unauthenticated
//! redirect and exposes the sign-out action that other tabs mirror.

use authsync::{IdentityHub, SyncConfig};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

/// Guarded landing page. Redirects to the login page when signed out.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let hub = expect_context::<IdentityHub>();
    let config = expect_context::<SyncConfig>();
    let location = use_location();

    install_unauth_redirect(auth, config, use_navigate());

    let user_name = move || auth.get().user.map(|u| u.name).unwrap_or_default();

    let on_sign_out = move |_| {
        let hub = hub.clone();
        leptos::task::spawn_local(crate::util::auth::sign_out(auth, hub));
    };

    view! {
        <div class="home-page">
            <header class="home-page__bar">
                <span class="home-page__path">{move || location.pathname.get()}</span>
                <span class="home-page__spacer"></span>
                <span class="home-page__user">{user_name}</span>
                <button class="btn" on:click=on_sign_out>"Sign out"</button>
            </header>
            <Show when=move || auth.get().loading>
                <p class="home-page__loading">"Checking your session..."</p>
            </Show>
        </div>
    }
}

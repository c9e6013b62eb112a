//! Root application component with routing and context providers.

use authsync::IdentityHub;
use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{home::HomePage, login::LoginPage};
use crate::state::auth::AuthState;
use crate::util::config::client_config;
use crate::util::session_sync::{SessionSync, install_session_probe};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides auth state, the identity hub and the session sync config, then
/// mounts `SessionSync` for the lifetime of the shell.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = client_config();
    let auth = RwSignal::new(AuthState::default());
    let hub = IdentityHub::new();

    provide_context(auth);
    provide_context(hub.clone());
    provide_context(config);

    install_session_probe(auth, hub);

    view! {
        <Stylesheet id="leptos" href="/pkg/authsync-client.css"/>
        <Title text="Sign in"/>
        <SessionSync/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("bid_notice") view=HomePage/>
            </Routes>
        </Router>
    }
}

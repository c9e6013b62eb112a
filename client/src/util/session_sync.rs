//! Shell-lifetime session synchronization.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionSync` is mounted once by the root `App`. It activates the
//! `authsync` coordinator against the real browser ports and runs it until the
//! shell is torn down. `install_session_probe` is this client's identity
//! layer: it polls `/api/auth/me` and reports what changed on the
//! `IdentityHub` the coordinator subscribes to.
//!
//! Both are inert in SSR and test builds.

use authsync::{IdentityHub, SyncConfig};
use leptos::prelude::*;

use crate::state::auth::AuthState;

/// Seconds between session probes once the initial load has finished.
pub const SESSION_PROBE_INTERVAL_SECS: u64 = 60;

/// Keeps this tab's auth state in step with every other open tab.
#[component]
pub fn SessionSync() -> impl IntoView {
    let hub = expect_context::<IdentityHub>();
    let config = expect_context::<SyncConfig>();

    #[cfg(feature = "hydrate")]
    {
        use authsync::{IdentitySubscription, SessionSyncCoordinator};

        use crate::util::browser::{BrowserAuthChannel, BrowserLocation, BrowserNavigator};

        let coordinator = SessionSyncCoordinator::activate(
            config,
            BrowserLocation,
            BrowserNavigator,
            BrowserAuthChannel::open,
            move |sink| Box::new(hub.subscribe(sink)) as Box<dyn IdentitySubscription>,
        );
        let (task, abort) = coordinator.into_task();
        leptos::task::spawn_local(task);
        on_cleanup(move || abort.abort());
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (hub, config);
    }
}

/// Load the session once, then keep probing it while the shell is alive.
///
/// Every probe is folded into `auth`; notifications it yields go to `hub`.
pub fn install_session_probe(auth: RwSignal<AuthState>, hub: IdentityHub) {
    #[cfg(feature = "hydrate")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::time::Duration;

        let alive = Arc::new(AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                let probe = crate::net::api::probe_session().await;
                if !alive_task.load(Ordering::Relaxed) {
                    break;
                }
                if let Some(notification) = auth.try_update(|a| a.apply_probe(probe)).flatten() {
                    hub.emit(notification);
                }
                gloo_timers::future::sleep(Duration::from_secs(SESSION_PROBE_INTERVAL_SECS)).await;
                if !alive_task.load(Ordering::Relaxed) {
                    break;
                }
            }
        });
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (auth, hub);
    }
}

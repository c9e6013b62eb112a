//! # client
//!
//! Leptos + WASM shell around the `authsync` session sync core.
//!
//! This crate contains the login and landing pages, auth state, the auth REST
//! calls, and the browser ports (`BroadcastChannel`, `location`) the session
//! sync coordinator runs against.

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and hydrate the server-rendered
/// shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logging unavailable: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}

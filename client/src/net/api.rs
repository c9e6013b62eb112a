//! REST helpers for the auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and tests: stubs, since the session cookie only exists
//! in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `SessionProbe`/`Result` outputs instead of panics so a flaky
//! network degrades to "unknown" and is never mistaken for a lost session.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::SessionProbe;
#[cfg(feature = "hydrate")]
use super::types::User;

pub const ME_ENDPOINT: &str = "/api/auth/me";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";

#[cfg(any(test, feature = "hydrate"))]
fn logout_failed_message(status: u16) -> String {
    format!("logout failed: {status}")
}

/// Ask the server whether this browser still holds a session.
pub async fn probe_session() -> SessionProbe {
    #[cfg(feature = "hydrate")]
    {
        let resp = match gloo_net::http::Request::get(ME_ENDPOINT).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::debug!("session probe failed: {e}");
                return SessionProbe::Unreachable;
            }
        };
        if !resp.ok() {
            return SessionProbe::from_status(resp.status());
        }
        match resp.json::<User>().await {
            Ok(user) => SessionProbe::Active(user),
            Err(e) => {
                log::warn!("session probe returned an unreadable body: {e}");
                SessionProbe::Unreachable
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        SessionProbe::Unreachable
    }
}

/// End the session by calling `POST /api/auth/logout`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server rejects it.
pub async fn logout() -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(LOGOUT_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(logout_failed_message(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

//! Build-time session sync configuration.
//!
//! The WASM bundle has no process environment, so the `AUTHSYNC_*` values are
//! captured with `option_env!` when the client is compiled. Invalid values
//! fall back to the defaults with a console warning rather than breaking the
//! shell.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use authsync::config::{ENV_CHANNEL_NAME, ENV_DEFAULT_LANDING, ENV_LOGIN_ROUTE, ENV_PROVIDER_HINT, ENV_PUBLIC_ROUTES};
use authsync::{SyncConfig, SyncSettings};

fn build_env(key: &str) -> Option<String> {
    let value = match key {
        ENV_CHANNEL_NAME => option_env!("AUTHSYNC_CHANNEL_NAME"),
        ENV_LOGIN_ROUTE => option_env!("AUTHSYNC_LOGIN_ROUTE"),
        ENV_DEFAULT_LANDING => option_env!("AUTHSYNC_DEFAULT_LANDING"),
        ENV_PUBLIC_ROUTES => option_env!("AUTHSYNC_PUBLIC_ROUTES"),
        ENV_PROVIDER_HINT => option_env!("AUTHSYNC_PROVIDER_HINT"),
        _ => None,
    };
    value.map(str::to_owned)
}

/// Configuration baked into this build.
pub fn client_config() -> SyncConfig {
    config_or_default(SyncSettings::default().overlay(build_env))
}

/// Validate `settings`, falling back to [`SyncConfig::default`] when invalid.
pub fn config_or_default(settings: SyncSettings) -> SyncConfig {
    match SyncConfig::from_settings(settings) {
        Ok(config) => config,
        Err(e) => {
            leptos::logging::warn!("invalid session sync config, using defaults: {e}");
            SyncConfig::default()
        }
    }
}

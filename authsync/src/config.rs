//! Sync configuration: channel name, login route, landing path, public routes.
//!
//! [`SyncSettings`] is the raw, serde-friendly form read from JSON or the
//! environment. [`SyncConfig`] is the validated form the coordinator uses.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::policy::{DEFAULT_PUBLIC_ROUTES, RedirectPolicy};
use crate::return_path::ReturnPath;

pub const DEFAULT_CHANNEL_NAME: &str = "bid-auth-sync";
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_LANDING_PATH: &str = "/bid_notice";

pub const ENV_CHANNEL_NAME: &str = "AUTHSYNC_CHANNEL_NAME";
pub const ENV_LOGIN_ROUTE: &str = "AUTHSYNC_LOGIN_ROUTE";
pub const ENV_DEFAULT_LANDING: &str = "AUTHSYNC_DEFAULT_LANDING";
pub const ENV_PUBLIC_ROUTES: &str = "AUTHSYNC_PUBLIC_ROUTES";
pub const ENV_PROVIDER_HINT: &str = "AUTHSYNC_PROVIDER_HINT";

/// Unvalidated settings. Missing JSON fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub channel_name: String,
    pub login_route: String,
    pub default_landing_path: String,
    pub public_routes: Vec<String>,
    pub provider_hint: Option<String>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            channel_name: DEFAULT_CHANNEL_NAME.to_owned(),
            login_route: DEFAULT_LOGIN_ROUTE.to_owned(),
            default_landing_path: DEFAULT_LANDING_PATH.to_owned(),
            public_routes: DEFAULT_PUBLIC_ROUTES.iter().map(|r| (*r).to_owned()).collect(),
            provider_hint: None,
        }
    }
}

impl SyncSettings {
    /// Parse settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Overlay values from `lookup` (an environment-like source) onto `self`.
    ///
    /// Recognized keys:
    /// - `AUTHSYNC_CHANNEL_NAME`
    /// - `AUTHSYNC_LOGIN_ROUTE`
    /// - `AUTHSYNC_DEFAULT_LANDING`
    /// - `AUTHSYNC_PUBLIC_ROUTES`: comma-separated list, replaces the default list
    /// - `AUTHSYNC_PROVIDER_HINT`
    ///
    /// Blank values are ignored.
    #[must_use]
    pub fn overlay<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        if let Some(value) = read(ENV_CHANNEL_NAME) {
            self.channel_name = value;
        }
        if let Some(value) = read(ENV_LOGIN_ROUTE) {
            self.login_route = value;
        }
        if let Some(value) = read(ENV_DEFAULT_LANDING) {
            self.default_landing_path = value;
        }
        if let Some(value) = read(ENV_PUBLIC_ROUTES) {
            self.public_routes = value
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_owned)
                .collect();
        }
        if let Some(value) = read(ENV_PROVIDER_HINT) {
            self.provider_hint = Some(value);
        }
        self
    }
}

/// Validated configuration for one application shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncConfig {
    pub channel_name: String,
    pub login_route: ReturnPath,
    pub default_landing: ReturnPath,
    pub policy: RedirectPolicy,
    pub provider_hint: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let login_route = ReturnPath::from_static(DEFAULT_LOGIN_ROUTE);
        let policy = RedirectPolicy::with_default_routes(&login_route);
        Self {
            channel_name: DEFAULT_CHANNEL_NAME.to_owned(),
            login_route,
            default_landing: ReturnPath::from_static(DEFAULT_LANDING_PATH),
            policy,
            provider_hint: None,
        }
    }
}

impl SyncConfig {
    /// Validate raw settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a route is not a same-origin path, the
    /// login route carries a query, or the channel name is blank.
    pub fn from_settings(settings: SyncSettings) -> Result<Self, ConfigError> {
        let channel_name = settings.channel_name.trim().to_owned();
        if channel_name.is_empty() {
            return Err(ConfigError::EmptyChannelName);
        }

        let login_route = ReturnPath::parse(settings.login_route.trim())
            .map_err(|e| ConfigError::UnsafePath { field: "login_route", value: e.0 })?;
        if login_route.path() != login_route.as_str() {
            return Err(ConfigError::LoginRouteHasQuery(login_route.into_string()));
        }

        let default_landing = ReturnPath::parse(settings.default_landing_path.trim())
            .map_err(|e| ConfigError::UnsafePath { field: "default_landing_path", value: e.0 })?;

        let policy = RedirectPolicy::new(&login_route, &settings.public_routes)?;
        let provider_hint = settings
            .provider_hint
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty());

        Ok(Self { channel_name, login_route, default_landing, policy, provider_hint })
    }

    /// Defaults overlaid with `AUTHSYNC_*` environment variables.
    ///
    /// # Errors
    ///
    /// See [`SyncConfig::from_settings`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_settings(SyncSettings::default().overlay(env_value))
    }
}

fn env_value(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

//! Error types for configuration assembly.
//!
//! Event handling itself has no error states: malformed payloads, unsafe
//! return paths and missing broadcast support all degrade to "do nothing" or
//! "use the default". Only building a [`crate::SyncConfig`] can fail.

/// Error returned when configuration values cannot form a valid [`crate::SyncConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A route-like setting is not a same-origin path.
    #[error("{field} must be a same-origin path starting with a single '/', got {value:?}")]
    UnsafePath { field: &'static str, value: String },
    /// The login route carries a query string or fragment.
    #[error("login route must not carry a query or fragment, got {0:?}")]
    LoginRouteHasQuery(String),
    /// The broadcast channel name is blank.
    #[error("channel name must not be empty")]
    EmptyChannelName,
    /// A public route entry is not an absolute path.
    #[error("public route {0:?} must start with a single '/'")]
    InvalidPublicRoute(String),
    /// A JSON settings document could not be parsed.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

//! Wire DTOs for the auth endpoints.
//!
//! DESIGN
//! ======
//! These mirror the server's `/api/auth/*` JSON bodies so serde stays the
//! only schema layer between the page code and the network.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An authenticated user as returned by the `/api/auth/me` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email, if the provider shared one.
    #[serde(default)]
    pub email: Option<String>,
    /// Identity provider that issued the session (e.g. `"kakao"`, `"email"`).
    #[serde(default = "default_auth_method")]
    pub auth_method: String,
}

fn default_auth_method() -> String {
    "session".to_owned()
}

/// Result of asking the server whether this browser still holds a session.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionProbe {
    /// The session is valid.
    Active(User),
    /// The server answered and there is no session (401/403).
    Missing,
    /// The server could not be reached or answered unexpectedly. Says nothing
    /// about the session.
    Unreachable,
}

impl SessionProbe {
    /// Classify an HTTP status from `/api/auth/me` when the body was not a user.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Missing,
            _ => Self::Unreachable,
        }
    }
}

//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects. Session probes update this state and, when the session appears
//! or disappears, produce the identity notification the session sync
//! coordinator listens for.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use authsync::{IdentityEventKind, IdentityNotification};

use crate::net::types::{SessionProbe, User};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    /// Fold a probe result into the state.
    ///
    /// The first conclusive probe reports `InitialSession`. Afterwards only a
    /// lost session is reported, as a refresh that left no session. An
    /// unreachable server changes nothing except ending the initial load.
    pub fn apply_probe(&mut self, probe: SessionProbe) -> Option<IdentityNotification> {
        let first = self.loading;
        self.loading = false;
        match probe {
            SessionProbe::Active(user) => {
                self.user = Some(user);
                first.then(|| IdentityNotification::new(IdentityEventKind::InitialSession, true))
            }
            SessionProbe::Missing => {
                let had_user = self.user.take().is_some();
                if first {
                    Some(IdentityNotification::new(IdentityEventKind::InitialSession, false))
                } else if had_user {
                    Some(IdentityNotification::refresh_failed())
                } else {
                    None
                }
            }
            SessionProbe::Unreachable => None,
        }
    }

    /// Clear the user after an explicit sign-out.
    pub fn sign_out(&mut self) -> IdentityNotification {
        self.user = None;
        self.loading = false;
        IdentityNotification::signed_out()
    }
}

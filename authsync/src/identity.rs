//! Identity-layer notifications and the hub that fans them out.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider owns sessions and token refresh. This module only
//! models what it reports: `(kind, session_present)` pairs, delivered in
//! emission order to every subscribed coordinator inbox.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::coordinator::{SyncInput, SyncSender};
use crate::event::AuthSyncEvent;

/// Kind of auth-state change reported by the identity layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentityEventKind {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

/// One auth-state change as reported by the identity layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdentityNotification {
    pub kind: IdentityEventKind,
    pub session_present: bool,
}

impl IdentityNotification {
    #[must_use]
    pub fn new(kind: IdentityEventKind, session_present: bool) -> Self {
        Self { kind, session_present }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::new(IdentityEventKind::SignedOut, false)
    }

    #[must_use]
    pub fn refresh_failed() -> Self {
        Self::new(IdentityEventKind::TokenRefreshed, false)
    }

    /// Map to the event other contexts should mirror, if any.
    ///
    /// Only an explicit sign-out and a refresh that left no session matter;
    /// every other notification passes through unhandled.
    #[must_use]
    pub fn sync_event(self) -> Option<AuthSyncEvent> {
        match (self.kind, self.session_present) {
            (IdentityEventKind::SignedOut, _) => Some(AuthSyncEvent::SignedOut),
            (IdentityEventKind::TokenRefreshed, false) => Some(AuthSyncEvent::SessionExpired),
            _ => None,
        }
    }
}

/// Release handle for an identity-layer subscription.
pub trait IdentitySubscription {
    /// Stop receiving notifications. Idempotent.
    fn unsubscribe(&mut self);
}

/// In-process identity notification fan-out.
///
/// The client's session hydration and sign-out flow report through one of
/// these; each coordinator subscribes its inbox.
#[derive(Clone, Debug, Default)]
pub struct IdentityHub {
    registry: Arc<Mutex<IdentityRegistry>>,
}

#[derive(Debug, Default)]
struct IdentityRegistry {
    next_id: u64,
    sinks: Vec<(u64, SyncSender)>,
}

impl IdentityHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn subscribe(&self, sink: SyncSender) -> HubSubscription {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.sinks.push((id, sink));
        HubSubscription { hub: self.clone(), id, active: true }
    }

    /// Deliver `notification` to every subscriber; returns how many received it.
    pub fn emit(&self, notification: IdentityNotification) -> usize {
        let mut registry = self.lock();
        let mut delivered = 0;
        registry.sinks.retain(|(_, sink)| {
            if sink.unbounded_send(SyncInput::Identity(notification)).is_err() {
                return false;
            }
            delivered += 1;
            true
        });
        tracing::debug!(kind = ?notification.kind, session = notification.session_present, delivered, "identity notification");
        delivered
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().sinks.len()
    }

    fn lock(&self) -> MutexGuard<'_, IdentityRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Subscription handle returned by [`IdentityHub::subscribe`].
#[derive(Debug)]
pub struct HubSubscription {
    hub: IdentityHub,
    id: u64,
    active: bool,
}

impl IdentitySubscription for HubSubscription {
    fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let id = self.id;
        self.hub.lock().sinks.retain(|(sink_id, _)| *sink_id != id);
    }
}

impl Drop for HubSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

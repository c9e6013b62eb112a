//! Cross-context broadcast channel abstraction.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser this is a same-origin `BroadcastChannel` (see the client
//! crate). [`LocalBroadcastHub`] is the in-process equivalent used by tests and
//! the CLI simulator: name-scoped, sender-excluding, and order-preserving per
//! listener. Neither keeps history; a message posted with no listener is gone.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::coordinator::{SyncInput, SyncSender};

/// Handle to a named broadcast channel owned by one context.
pub trait AuthChannel {
    /// Deliver `payload` to every other context listening on this channel.
    fn post(&self, payload: &Value);

    /// Stop listening and release the underlying resource. Idempotent.
    fn close(&mut self);
}

impl<T: AuthChannel + ?Sized> AuthChannel for Box<T> {
    fn post(&self, payload: &Value) {
        (**self).post(payload);
    }

    fn close(&mut self) {
        (**self).close();
    }
}

/// In-process broadcast medium shared by simulated contexts.
#[derive(Clone, Debug, Default)]
pub struct LocalBroadcastHub {
    registry: Arc<Mutex<HubRegistry>>,
}

#[derive(Debug, Default)]
struct HubRegistry {
    next_id: u64,
    listeners: Vec<HubListener>,
}

#[derive(Debug)]
struct HubListener {
    id: u64,
    name: String,
    sink: SyncSender,
}

impl LocalBroadcastHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Join channel `name`; inbound messages are pushed into `sink`.
    #[must_use]
    pub fn open(&self, name: &str, sink: SyncSender) -> LocalChannel {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push(HubListener { id, name: name.to_owned(), sink });
        LocalChannel { hub: self.clone(), id, name: name.to_owned(), closed: false }
    }

    /// Number of live listeners on channel `name`.
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        self.lock().listeners.iter().filter(|l| l.name == name).count()
    }

    fn lock(&self) -> MutexGuard<'_, HubRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn deliver(&self, from: u64, name: &str, payload: &Value) -> usize {
        let mut registry = self.lock();
        let mut delivered = 0;
        registry.listeners.retain(|listener| {
            if listener.id == from || listener.name != name {
                return true;
            }
            if listener.sink.unbounded_send(SyncInput::Broadcast(payload.clone())).is_err() {
                tracing::trace!(listener = listener.id, "dropping listener with closed inbox");
                return false;
            }
            delivered += 1;
            true
        });
        delivered
    }

    fn remove(&self, id: u64) {
        self.lock().listeners.retain(|l| l.id != id);
    }
}

/// One context's membership in a [`LocalBroadcastHub`] channel.
#[derive(Debug)]
pub struct LocalChannel {
    hub: LocalBroadcastHub,
    id: u64,
    name: String,
    closed: bool,
}

impl LocalChannel {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl AuthChannel for LocalChannel {
    fn post(&self, payload: &Value) {
        if self.closed {
            return;
        }
        let delivered = self.hub.deliver(self.id, &self.name, payload);
        tracing::trace!(channel = %self.name, delivered, "broadcast posted");
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.hub.remove(self.id);
    }
}

impl Drop for LocalChannel {
    fn drop(&mut self) {
        self.close();
    }
}

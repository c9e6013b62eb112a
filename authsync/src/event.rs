//! Auth sync events and their cross-context wire codec.
//!
//! The wire shape is a JSON object with exactly one field, `type`, holding one
//! of the literal tags below. Payloads from other contexts are untrusted; the
//! decoder is total and answers `None` for anything it did not produce.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use std::fmt;

use serde_json::{Map, Value};

use crate::channel::AuthChannel;

/// Wire tag for [`AuthSyncEvent::SignedOut`].
pub const SIGNED_OUT_TAG: &str = "SIGNED_OUT";
/// Wire tag for [`AuthSyncEvent::SessionExpired`].
pub const SESSION_EXPIRED_TAG: &str = "SESSION_EXPIRED";

const TYPE_FIELD: &str = "type";

/// Login hint forwarded as `error=` when a session expired underneath the user.
pub const SESSION_EXPIRED_HINT: &str = "session_expired";

/// A session transition mirrored across open contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthSyncEvent {
    /// The user explicitly signed out.
    SignedOut,
    /// The identity layer could not refresh the session.
    SessionExpired,
}

impl AuthSyncEvent {
    pub const ALL: [Self; 2] = [Self::SignedOut, Self::SessionExpired];

    #[must_use]
    pub fn wire_tag(self) -> &'static str {
        match self {
            Self::SignedOut => SIGNED_OUT_TAG,
            Self::SessionExpired => SESSION_EXPIRED_TAG,
        }
    }

    #[must_use]
    pub fn from_wire_tag(tag: &str) -> Option<Self> {
        match tag {
            SIGNED_OUT_TAG => Some(Self::SignedOut),
            SESSION_EXPIRED_TAG => Some(Self::SessionExpired),
            _ => None,
        }
    }

    /// Minimal wire object: `{"type": "<TAG>"}`.
    #[must_use]
    pub fn to_wire(self) -> Value {
        let mut object = Map::with_capacity(1);
        object.insert(TYPE_FIELD.to_owned(), Value::String(self.wire_tag().to_owned()));
        Value::Object(object)
    }

    /// `error` hint for the login page, if this reason deserves one.
    #[must_use]
    pub fn login_error_hint(self) -> Option<&'static str> {
        match self {
            Self::SignedOut => None,
            Self::SessionExpired => Some(SESSION_EXPIRED_HINT),
        }
    }
}

impl fmt::Display for AuthSyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_tag())
    }
}

/// Validate an untrusted payload from another context.
///
/// Accepts exactly `{"type":"SIGNED_OUT"}` or `{"type":"SESSION_EXPIRED"}`.
/// Extra fields, missing fields, non-string tags and non-object values all
/// yield `None`.
#[must_use]
pub fn normalize_auth_sync_event(raw: &Value) -> Option<AuthSyncEvent> {
    let object = raw.as_object()?;
    if object.len() != 1 {
        return None;
    }
    let tag = object.get(TYPE_FIELD)?.as_str()?;
    AuthSyncEvent::from_wire_tag(tag)
}

/// Serialize `event` as JSON text for string-based transports.
#[must_use]
pub fn encode_auth_sync_event(event: AuthSyncEvent) -> String {
    event.to_wire().to_string()
}

/// Parse JSON text and validate it; malformed JSON is just another invalid payload.
#[must_use]
pub fn decode_auth_sync_event(text: &str) -> Option<AuthSyncEvent> {
    match serde_json::from_str::<Value>(text) {
        Ok(raw) => normalize_auth_sync_event(&raw),
        Err(_) => None,
    }
}

/// Post `event` on `channel`. No-op when the runtime has no broadcast support.
pub fn publish_auth_sync_event<C: AuthChannel + ?Sized>(channel: Option<&C>, event: AuthSyncEvent) {
    let Some(channel) = channel else {
        tracing::debug!(%event, "no broadcast channel; skipping publish");
        return;
    };
    channel.post(&event.to_wire());
}

//! Cross-context auth session sync and redirect-safety rules.
//!
//! This crate is shared by the `client` (browser) and `cli` crates and has no
//! UI or browser dependency of its own. It covers:
//!
//! - [`return_path`]: `returnTo` sanitization against open redirects.
//! - [`event`]: the two mirrored auth events and their JSON wire shape.
//! - [`channel`]: the broadcast channel port and an in-process hub.
//! - [`policy`]: whether a context must be sent to the login page.
//! - [`coordinator`]: the per-shell orchestrator wiring the above together.
//!
//! Browser globals are injected through the [`AuthChannel`],
//! [`CurrentLocation`] and [`Navigator`] traits.

pub mod channel;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod identity;
pub mod login_url;
pub mod policy;
pub mod return_path;

pub use channel::{AuthChannel, LocalBroadcastHub, LocalChannel};
pub use config::{SyncConfig, SyncSettings};
pub use coordinator::{CurrentLocation, Navigator, SessionSyncCoordinator, SyncDecision, SyncInbox, SyncInput, SyncSender};
pub use error::ConfigError;
pub use event::{
    AuthSyncEvent, decode_auth_sync_event, encode_auth_sync_event, normalize_auth_sync_event, publish_auth_sync_event,
};
pub use identity::{HubSubscription, IdentityEventKind, IdentityHub, IdentityNotification, IdentitySubscription};
pub use login_url::{LoginHints, build_login_url, login_url_with_return_to, provider_sign_in_url, return_path_for};
pub use policy::RedirectPolicy;
pub use return_path::{ReturnPath, UnsafeReturnPath, as_single_param_value, sanitize_return_to};

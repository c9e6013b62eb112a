//! Session sync coordinator.
//!
//! SYSTEM CONTEXT
//! ==============
//! One coordinator runs per application shell. It owns the broadcast channel
//! and the identity subscription, and turns their inputs into at most one
//! full-page navigation per input:
//!
//! - identity `SignedOut` / refresh-without-session: publish the event, then
//!   apply the redirect policy locally.
//! - inbound broadcast: validate, then apply the redirect policy. Never
//!   re-published, so N open contexts can't echo an event forever.
//!
//! Browser globals (location, navigation, `BroadcastChannel`) are injected as
//! ports so the same code runs in tests and in the CLI simulator.
//!
//! LIFECYCLE
//! =========
//! [`SessionSyncCoordinator::activate`] acquires the channel and the identity
//! subscription; [`SessionSyncCoordinator::deactivate`] (also run on drop)
//! releases both. Once deactivated, every input is ignored.

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod coordinator_test;

use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::future::{AbortHandle, Abortable};
use serde_json::Value;

use crate::channel::AuthChannel;
use crate::config::SyncConfig;
use crate::event::{AuthSyncEvent, normalize_auth_sync_event, publish_auth_sync_event};
use crate::identity::{IdentityNotification, IdentitySubscription};
use crate::login_url::{LoginHints, build_login_url};

/// Input delivered to a coordinator inbox.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncInput {
    /// Auth-state change reported by the identity layer of this context.
    Identity(IdentityNotification),
    /// Raw, untrusted payload received from another context.
    Broadcast(Value),
}

pub type SyncSender = UnboundedSender<SyncInput>;
pub type SyncInbox = UnboundedReceiver<SyncInput>;

/// Read access to the current location. Read fresh on every decision.
pub trait CurrentLocation {
    fn pathname(&self) -> String;
    /// Query string, with or without the leading `?`; empty when none.
    fn search(&self) -> String;
}

/// Full top-level navigation. Discards all client-side state.
pub trait Navigator {
    fn navigate(&self, url: &str);
}

/// Outcome of handling one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncDecision {
    /// Nothing to do: unrelated notification, invalid payload, or inactive coordinator.
    Ignored,
    /// A valid event arrived but this context is already on a public route.
    Suppressed(AuthSyncEvent),
    /// This context was sent to `url`.
    Redirected { event: AuthSyncEvent, url: String },
}

pub struct SessionSyncCoordinator<C, L, N>
where
    C: AuthChannel,
    L: CurrentLocation,
    N: Navigator,
{
    config: SyncConfig,
    channel: Option<C>,
    identity: Option<Box<dyn IdentitySubscription>>,
    inbox: Option<SyncInbox>,
    location: L,
    navigator: N,
    active: bool,
}

impl<C, L, N> SessionSyncCoordinator<C, L, N>
where
    C: AuthChannel,
    L: CurrentLocation,
    N: Navigator,
{
    /// Create the inbox, open the channel and subscribe to the identity layer.
    ///
    /// `open_channel` receives the configured channel name and an inbox sender
    /// for inbound messages; it returns `None` when the runtime has no
    /// broadcast support, in which case this context still reacts to its own
    /// identity notifications.
    pub fn activate<OC, SI>(config: SyncConfig, location: L, navigator: N, open_channel: OC, subscribe_identity: SI) -> Self
    where
        OC: FnOnce(&str, SyncSender) -> Option<C>,
        SI: FnOnce(SyncSender) -> Box<dyn IdentitySubscription>,
    {
        let (tx, rx) = mpsc::unbounded();
        let channel = open_channel(&config.channel_name, tx.clone());
        if channel.is_none() {
            tracing::warn!(channel = %config.channel_name, "broadcast unsupported; cross-context sync disabled");
        }
        let identity = subscribe_identity(tx);
        tracing::debug!(channel = %config.channel_name, "session sync activated");

        Self {
            config,
            channel,
            identity: Some(identity),
            inbox: Some(rx),
            location,
            navigator,
            active: true,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn has_channel(&self) -> bool {
        self.channel.is_some()
    }

    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn handle(&mut self, input: SyncInput) -> SyncDecision {
        match input {
            SyncInput::Identity(notification) => self.handle_identity(notification),
            SyncInput::Broadcast(raw) => self.handle_broadcast(&raw),
        }
    }

    /// React to a locally reported auth-state change: publish, then decide.
    pub fn handle_identity(&mut self, notification: IdentityNotification) -> SyncDecision {
        if !self.active {
            return SyncDecision::Ignored;
        }
        let Some(event) = notification.sync_event() else {
            return SyncDecision::Ignored;
        };
        publish_auth_sync_event(self.channel.as_ref(), event);
        tracing::info!(%event, "published auth sync event");
        self.apply_policy(event)
    }

    /// React to a payload from another context. Never re-published.
    pub fn handle_broadcast(&mut self, raw: &Value) -> SyncDecision {
        if !self.active {
            return SyncDecision::Ignored;
        }
        let Some(event) = normalize_auth_sync_event(raw) else {
            tracing::trace!("ignoring unrecognized broadcast payload");
            return SyncDecision::Ignored;
        };
        tracing::info!(%event, "received auth sync event from another context");
        self.apply_policy(event)
    }

    fn apply_policy(&self, event: AuthSyncEvent) -> SyncDecision {
        let pathname = self.location.pathname();
        if !self.config.policy.should_force_login_redirect(&pathname, event) {
            tracing::debug!(%event, path = %pathname, "already on a public route; redirect suppressed");
            return SyncDecision::Suppressed(event);
        }

        let hints = LoginHints::for_event(event, self.config.provider_hint.as_deref());
        let url = build_login_url(&self.config, &pathname, &self.location.search(), &hints);
        tracing::debug!(%event, %url, "forcing login navigation");
        self.navigator.navigate(&url);
        SyncDecision::Redirected { event, url }
    }

    /// Handle every input already queued in the inbox, without waiting.
    pub fn pump(&mut self) -> Vec<SyncDecision> {
        let Some(mut inbox) = self.inbox.take() else {
            return Vec::new();
        };
        let mut decisions = Vec::new();
        while self.active {
            match inbox.try_next() {
                Ok(Some(input)) => decisions.push(self.handle(input)),
                Ok(None) | Err(_) => break,
            }
        }
        self.inbox = Some(inbox);
        decisions
    }

    /// Handle inputs as they arrive until the inbox closes; always deactivates
    /// on exit.
    pub async fn run(mut self) {
        if let Some(mut inbox) = self.inbox.take() {
            while let Some(input) = inbox.next().await {
                self.handle(input);
            }
        }
        self.deactivate();
    }

    /// Wrap [`Self::run`] so the owner can stop it. Aborting drops the
    /// coordinator at the task's next poll, which releases its resources; no
    /// input is handled after the abort.
    pub fn into_task(self) -> (impl Future<Output = ()>, AbortHandle) {
        let (handle, registration) = AbortHandle::new_pair();
        let task = Abortable::new(self.run(), registration);
        (
            async move {
                if task.await.is_err() {
                    tracing::debug!("session sync task aborted");
                }
            },
            handle,
        )
    }

    /// Release the identity subscription and the channel. Idempotent.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(mut identity) = self.identity.take() {
            identity.unsubscribe();
        }
        if let Some(mut channel) = self.channel.take() {
            channel.close();
        }
        if let Some(mut inbox) = self.inbox.take() {
            inbox.close();
        }
        tracing::debug!(channel = %self.config.channel_name, "session sync deactivated");
    }
}

impl<C, L, N> Drop for SessionSyncCoordinator<C, L, N>
where
    C: AuthChannel,
    L: CurrentLocation,
    N: Navigator,
{
    fn drop(&mut self) {
        self.deactivate();
    }
}

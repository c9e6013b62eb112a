//! Browser-backed ports for the session sync coordinator.
//!
//! `BroadcastChannel` delivers structured clones, so outbound messages are
//! converted to JS via `JSON.parse` and inbound ones back via `JSON.stringify`.
//! Anything that does not survive that trip is dropped before it reaches the
//! coordinator inbox. Hydrate builds only.

use authsync::{AuthChannel, CurrentLocation, Navigator, SyncInput, SyncSender};
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{BroadcastChannel, MessageEvent};

/// `window.location`, read on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocation;

impl CurrentLocation for BrowserLocation {
    fn pathname(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn search(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }
}

/// Full-page navigation through `location.href`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window; cannot navigate to {url}");
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            log::warn!("navigation to {url} failed: {e:?}");
        }
    }
}

/// A named same-origin `BroadcastChannel` feeding a coordinator inbox.
pub struct BrowserAuthChannel {
    channel: BroadcastChannel,
    _message_handler: Closure<dyn FnMut(MessageEvent)>,
    closed: bool,
}

impl BrowserAuthChannel {
    /// Open `name`, forwarding every inbound message to `sink`.
    ///
    /// Returns `None` when the runtime has no `BroadcastChannel`.
    pub fn open(name: &str, sink: SyncSender) -> Option<Self> {
        let channel = match BroadcastChannel::new(name) {
            Ok(channel) => channel,
            Err(e) => {
                log::warn!("BroadcastChannel unavailable: {e:?}");
                return None;
            }
        };

        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(raw) = js_to_json(&event.data()) else {
                log::trace!("dropping non-JSON broadcast message");
                return;
            };
            if sink.unbounded_send(SyncInput::Broadcast(raw)).is_err() {
                log::debug!("session sync inbox closed; broadcast dropped");
            }
        }) as Box<dyn FnMut(_)>);
        channel.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        Some(Self { channel, _message_handler: onmessage, closed: false })
    }
}

impl AuthChannel for BrowserAuthChannel {
    fn post(&self, message: &Value) {
        if self.closed {
            return;
        }
        let js = match js_sys::JSON::parse(&message.to_string()) {
            Ok(js) => js,
            Err(e) => {
                log::warn!("could not convert broadcast message: {e:?}");
                return;
            }
        };
        if let Err(e) = self.channel.post_message(&js) {
            log::warn!("broadcast post failed: {e:?}");
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.channel.set_onmessage(None);
        self.channel.close();
    }
}

impl Drop for BrowserAuthChannel {
    fn drop(&mut self) {
        self.close();
    }
}

fn js_to_json(value: &JsValue) -> Option<Value> {
    let text = js_sys::JSON::stringify(value).ok()?.as_string()?;
    serde_json::from_str(&text).ok()
}

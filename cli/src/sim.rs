//! In-process multi-context simulation.
//!
//! Each context gets its own coordinator, identity hub, fixed location and
//! recording navigator; all contexts share one `LocalBroadcastHub`, the way
//! same-origin tabs share only a broadcast channel name.

use std::cell::RefCell;
use std::rc::Rc;

use authsync::{
    CurrentLocation, IdentityHub, IdentityNotification, LocalBroadcastHub, LocalChannel, Navigator,
    SessionSyncCoordinator, SyncConfig, SyncDecision,
};

/// Rounds after which a simulation that still produces decisions is cut off.
pub const MAX_ROUNDS: usize = 16;

#[derive(Clone, Debug)]
struct FixedLocation {
    path: String,
    search: String,
}

impl CurrentLocation for FixedLocation {
    fn pathname(&self) -> String {
        self.path.clone()
    }

    fn search(&self) -> String {
        self.search.clone()
    }
}

#[derive(Clone, Debug, Default)]
struct RecordingNavigator(Rc<RefCell<Vec<String>>>);

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.0.borrow_mut().push(url.to_owned());
    }
}

struct Context {
    location: String,
    identity: IdentityHub,
    navigator: RecordingNavigator,
    coordinator: SessionSyncCoordinator<LocalChannel, FixedLocation, RecordingNavigator>,
}

/// What one context did over the whole run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextReport {
    pub location: String,
    pub decisions: Vec<SyncDecision>,
    pub navigations: Vec<String>,
}

/// Outcome of a simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationReport {
    pub contexts: Vec<ContextReport>,
    /// Pump rounds that produced at least one decision.
    pub active_rounds: usize,
    /// Whether every inbox drained before [`MAX_ROUNDS`].
    pub settled: bool,
}

/// Open one context per `locations` entry (`path` or `path?query`), emit
/// `notification` in context `origin`, and pump until every inbox is empty.
///
/// Returns `None` when `origin` is out of range.
pub fn simulate(
    config: &SyncConfig,
    locations: &[String],
    origin: usize,
    notification: IdentityNotification,
) -> Option<SimulationReport> {
    if origin >= locations.len() {
        return None;
    }

    let hub = LocalBroadcastHub::new();
    let mut contexts: Vec<Context> = locations.iter().map(|loc| open_context(&hub, config, loc)).collect();
    let mut decisions: Vec<Vec<SyncDecision>> = vec![Vec::new(); contexts.len()];

    let delivered = contexts[origin].identity.emit(notification);
    tracing::debug!(origin, delivered, ?notification, "emitted identity notification");

    let mut active_rounds = 0;
    let mut settled = false;
    for _ in 0..MAX_ROUNDS {
        let mut any = false;
        for (ctx, out) in contexts.iter_mut().zip(decisions.iter_mut()) {
            let round = ctx.coordinator.pump();
            any |= !round.is_empty();
            out.extend(round);
        }
        if !any {
            settled = true;
            break;
        }
        active_rounds += 1;
    }

    let contexts = contexts
        .into_iter()
        .zip(decisions)
        .map(|(ctx, decisions)| ContextReport {
            location: ctx.location,
            decisions,
            navigations: ctx.navigator.0.borrow().clone(),
        })
        .collect();

    Some(SimulationReport { contexts, active_rounds, settled })
}

fn open_context(hub: &LocalBroadcastHub, config: &SyncConfig, location: &str) -> Context {
    let (path, search) = match location.split_once('?') {
        Some((path, query)) => (path.to_owned(), format!("?{query}")),
        None => (location.to_owned(), String::new()),
    };
    let identity = IdentityHub::new();
    let navigator = RecordingNavigator::default();
    let coordinator = SessionSyncCoordinator::activate(
        config.clone(),
        FixedLocation { path, search },
        navigator.clone(),
        |name, sink| Some(hub.open(name, sink)),
        |sink| Box::new(identity.subscribe(sink)),
    );
    Context { location: location.to_owned(), identity, navigator, coordinator }
}

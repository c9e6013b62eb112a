use super::*;
use futures::channel::mpsc;

fn drain(rx: &mut mpsc::UnboundedReceiver<SyncInput>) -> Vec<IdentityNotification> {
    let mut out = Vec::new();
    while let Ok(Some(input)) = rx.try_next() {
        if let SyncInput::Identity(n) = input {
            out.push(n);
        }
    }
    out
}

// =============================================================
// Notification mapping
// =============================================================

#[test]
fn sign_out_maps_to_signed_out_regardless_of_session_flag() {
    assert_eq!(IdentityNotification::signed_out().sync_event(), Some(AuthSyncEvent::SignedOut));
    let odd = IdentityNotification::new(IdentityEventKind::SignedOut, true);
    assert_eq!(odd.sync_event(), Some(AuthSyncEvent::SignedOut));
}

#[test]
fn refresh_without_session_maps_to_expiry() {
    assert_eq!(IdentityNotification::refresh_failed().sync_event(), Some(AuthSyncEvent::SessionExpired));
}

#[test]
fn refresh_with_session_is_ignored() {
    let n = IdentityNotification::new(IdentityEventKind::TokenRefreshed, true);
    assert_eq!(n.sync_event(), None);
}

#[test]
fn other_kinds_are_ignored() {
    for kind in [
        IdentityEventKind::InitialSession,
        IdentityEventKind::SignedIn,
        IdentityEventKind::UserUpdated,
        IdentityEventKind::PasswordRecovery,
    ] {
        assert_eq!(IdentityNotification::new(kind, false).sync_event(), None, "{kind:?}");
        assert_eq!(IdentityNotification::new(kind, true).sync_event(), None, "{kind:?}");
    }
}

// =============================================================
// IdentityHub
// =============================================================

#[test]
fn emit_delivers_in_order_to_every_subscriber() {
    let hub = IdentityHub::new();
    let (tx_a, mut rx_a) = mpsc::unbounded();
    let (tx_b, mut rx_b) = mpsc::unbounded();
    let _a = hub.subscribe(tx_a);
    let _b = hub.subscribe(tx_b);

    let signed_in = IdentityNotification::new(IdentityEventKind::SignedIn, true);
    assert_eq!(hub.emit(signed_in), 2);
    assert_eq!(hub.emit(IdentityNotification::signed_out()), 2);

    let expected = vec![signed_in, IdentityNotification::signed_out()];
    assert_eq!(drain(&mut rx_a), expected);
    assert_eq!(drain(&mut rx_b), expected);
}

#[test]
fn unsubscribe_stops_delivery() {
    let hub = IdentityHub::new();
    let (tx, mut rx) = mpsc::unbounded();
    let mut sub = hub.subscribe(tx);

    sub.unsubscribe();
    sub.unsubscribe();

    assert_eq!(hub.emit(IdentityNotification::signed_out()), 0);
    assert_eq!(hub.subscriber_count(), 0);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn dropping_subscription_unsubscribes() {
    let hub = IdentityHub::new();
    let (tx, _rx) = mpsc::unbounded();
    drop(hub.subscribe(tx));
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn closed_inboxes_are_pruned_on_emit() {
    let hub = IdentityHub::new();
    let (tx, rx) = mpsc::unbounded();
    let _sub = hub.subscribe(tx);
    drop(rx);

    assert_eq!(hub.emit(IdentityNotification::signed_out()), 0);
    assert_eq!(hub.subscriber_count(), 0);
}

use super::*;
use futures::FutureExt;

#[test]
fn logout_failed_message_formats_status() {
    assert_eq!(logout_failed_message(502), "logout failed: 502");
}

#[test]
fn probe_is_unknown_outside_the_browser() {
    assert_eq!(probe_session().now_or_never(), Some(SessionProbe::Unreachable));
}

#[test]
fn logout_is_unavailable_outside_the_browser() {
    assert!(logout().now_or_never().is_some_and(|r| r.is_err()));
}

use super::*;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        name: "Alice".to_owned(),
        email: None,
        auth_method: "kakao".to_owned(),
    }
}

#[test]
fn default_state_is_loading_without_user() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
}

#[test]
fn first_active_probe_reports_initial_session() {
    let mut state = AuthState::default();
    let n = state.apply_probe(SessionProbe::Active(user()));
    assert_eq!(n, Some(IdentityNotification::new(IdentityEventKind::InitialSession, true)));
    assert!(!state.loading);
    assert_eq!(state.user, Some(user()));
}

#[test]
fn first_missing_probe_reports_initial_session_without_sync_event() {
    let mut state = AuthState::default();
    let n = state.apply_probe(SessionProbe::Missing).unwrap();
    assert_eq!(n.kind, IdentityEventKind::InitialSession);
    assert!(!n.session_present);
    assert_eq!(n.sync_event(), None);
}

#[test]
fn losing_a_session_reports_refresh_failure() {
    let mut state = AuthState::default();
    state.apply_probe(SessionProbe::Active(user()));

    let n = state.apply_probe(SessionProbe::Missing);
    assert_eq!(n, Some(IdentityNotification::refresh_failed()));
    assert!(state.user.is_none());

    // Already signed out: nothing further to report.
    assert_eq!(state.apply_probe(SessionProbe::Missing), None);
}

#[test]
fn repeated_active_probes_are_quiet() {
    let mut state = AuthState::default();
    state.apply_probe(SessionProbe::Active(user()));
    assert_eq!(state.apply_probe(SessionProbe::Active(user())), None);
}

#[test]
fn unreachable_probe_keeps_the_user() {
    let mut state = AuthState::default();
    state.apply_probe(SessionProbe::Active(user()));
    assert_eq!(state.apply_probe(SessionProbe::Unreachable), None);
    assert_eq!(state.user, Some(user()));
}

#[test]
fn unreachable_first_probe_ends_loading() {
    let mut state = AuthState::default();
    assert_eq!(state.apply_probe(SessionProbe::Unreachable), None);
    assert!(!state.loading);
}

#[test]
fn sign_out_clears_user_and_reports_signed_out() {
    let mut state = AuthState::default();
    state.apply_probe(SessionProbe::Active(user()));
    let n = state.sign_out();
    assert_eq!(n, IdentityNotification::signed_out());
    assert!(state.user.is_none());
}

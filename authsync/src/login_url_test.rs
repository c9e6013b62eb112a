use super::*;

fn query_pairs(url: &str) -> Vec<(String, String)> {
    let (_, query) = url.split_once('?').expect("login url has a query");
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

fn param(url: &str, key: &str) -> Option<String> {
    query_pairs(url).into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

#[test]
fn join_handles_leading_question_mark_and_empty_search() {
    assert_eq!(join_path_and_search("/profile", ""), "/profile");
    assert_eq!(join_path_and_search("/profile", "?"), "/profile");
    assert_eq!(join_path_and_search("/profile", "?tab=2"), "/profile?tab=2");
    assert_eq!(join_path_and_search("/profile", "tab=2"), "/profile?tab=2");
}

#[test]
fn embeds_current_path_and_query_as_return_to() {
    let cfg = SyncConfig::default();
    let url = build_login_url(&cfg, "/bid_notice/detail/1", "?x=1", &LoginHints::default());

    assert!(url.starts_with("/login?"));
    assert_eq!(param(&url, "returnTo").as_deref(), Some("/bid_notice/detail/1?x=1"));
    assert_eq!(param(&url, "error"), None);
    assert_eq!(param(&url, "provider"), None);
}

#[test]
fn unsafe_current_location_falls_back_to_landing() {
    let cfg = SyncConfig::default();
    let url = build_login_url(&cfg, "//evil.example.com", "", &LoginHints::default());
    assert_eq!(param(&url, "returnTo").as_deref(), Some("/bid_notice"));
}

#[test]
fn return_to_is_percent_encoded() {
    let cfg = SyncConfig::default();
    let url = build_login_url(&cfg, "/search", "?q=a&b=c", &LoginHints::default());
    assert_eq!(url, "/login?returnTo=%2Fsearch%3Fq%3Da%26b%3Dc");
    assert_eq!(query_pairs(&url).len(), 1);
}

#[test]
fn forwards_error_and_provider_hints() {
    let cfg = SyncConfig::default();
    let hints = LoginHints::for_event(AuthSyncEvent::SessionExpired, Some("kakao"));
    let url = build_login_url(&cfg, "/profile", "", &hints);

    assert_eq!(param(&url, "returnTo").as_deref(), Some("/profile"));
    assert_eq!(param(&url, "error").as_deref(), Some("session_expired"));
    assert_eq!(param(&url, "provider").as_deref(), Some("kakao"));
}

#[test]
fn blank_hints_are_omitted() {
    let cfg = SyncConfig::default();
    let hints = LoginHints { error: Some("  ".to_owned()), provider: Some(String::new()) };
    let url = build_login_url(&cfg, "/profile", "", &hints);
    assert_eq!(query_pairs(&url).len(), 1);
}

#[test]
fn signed_out_hints_carry_no_error() {
    let hints = LoginHints::for_event(AuthSyncEvent::SignedOut, None);
    assert_eq!(hints, LoginHints::default());
}

#[test]
fn provider_sign_in_url_carries_return_path() {
    let target = ReturnPath::parse("/bid_notice/detail/1?x=1").unwrap();
    assert_eq!(
        provider_sign_in_url("Kakao", &target).as_deref(),
        Some("/auth/kakao?returnTo=%2Fbid_notice%2Fdetail%2F1%3Fx%3D1")
    );
}

#[test]
fn provider_sign_in_url_rejects_non_slug_providers() {
    let target = ReturnPath::parse("/profile").unwrap();
    for provider in ["", "  ", "../admin", "evil.example.com", "a/b", "kakao?x=1"] {
        assert_eq!(provider_sign_in_url(provider, &target), None, "{provider:?}");
    }
}

#[test]
fn context_on_site_root_returns_to_landing() {
    let cfg = SyncConfig::default();
    assert_eq!(build_login_url(&cfg, "/", "", &LoginHints::default()), "/login?returnTo=%2Fbid_notice");
}

use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn default_config_matches_default_settings() {
    let from_settings = SyncConfig::from_settings(SyncSettings::default()).expect("defaults are valid");
    assert_eq!(from_settings, SyncConfig::default());
}

#[test]
fn default_config_values() {
    let cfg = SyncConfig::default();
    assert_eq!(cfg.channel_name, "bid-auth-sync");
    assert_eq!(cfg.login_route.as_str(), "/login");
    assert_eq!(cfg.default_landing.as_str(), "/bid_notice");
    assert!(cfg.policy.is_public_route("/login"));
    assert!(cfg.policy.is_public_route("/signup"));
    assert_eq!(cfg.provider_hint, None);
}

#[test]
fn overlay_replaces_present_values() {
    let settings = SyncSettings::default().overlay(lookup_from(&[
        ("AUTHSYNC_CHANNEL_NAME", "tenant-auth"),
        ("AUTHSYNC_LOGIN_ROUTE", "/sign-in"),
        ("AUTHSYNC_DEFAULT_LANDING", "/home"),
        ("AUTHSYNC_PUBLIC_ROUTES", " /sign-in, /welcome ,,"),
        ("AUTHSYNC_PROVIDER_HINT", "kakao"),
    ]));
    let cfg = SyncConfig::from_settings(settings).expect("valid");

    assert_eq!(cfg.channel_name, "tenant-auth");
    assert_eq!(cfg.login_route.as_str(), "/sign-in");
    assert_eq!(cfg.default_landing.as_str(), "/home");
    assert_eq!(cfg.policy.public_routes(), ["/sign-in".to_owned(), "/welcome".to_owned()]);
    assert_eq!(cfg.provider_hint.as_deref(), Some("kakao"));
}

#[test]
fn overlay_ignores_blank_values() {
    let settings = SyncSettings::default().overlay(lookup_from(&[
        ("AUTHSYNC_CHANNEL_NAME", "   "),
        ("AUTHSYNC_LOGIN_ROUTE", ""),
        ("AUTHSYNC_PROVIDER_HINT", " "),
    ]));
    assert_eq!(settings, SyncSettings::default());
}

#[test]
fn rejects_unsafe_landing_path() {
    let settings = SyncSettings { default_landing_path: "https://evil.example.com".to_owned(), ..SyncSettings::default() };
    let err = SyncConfig::from_settings(settings).expect_err("unsafe landing");
    assert!(matches!(err, ConfigError::UnsafePath { field: "default_landing_path", .. }));
}

#[test]
fn rejects_protocol_relative_login_route() {
    let settings = SyncSettings { login_route: "//login".to_owned(), ..SyncSettings::default() };
    let err = SyncConfig::from_settings(settings).expect_err("unsafe login route");
    assert!(matches!(err, ConfigError::UnsafePath { field: "login_route", .. }));
}

#[test]
fn rejects_login_route_with_query() {
    let settings = SyncSettings { login_route: "/login?x=1".to_owned(), ..SyncSettings::default() };
    let err = SyncConfig::from_settings(settings).expect_err("query");
    assert!(matches!(err, ConfigError::LoginRouteHasQuery(_)));
}

#[test]
fn rejects_blank_channel_name() {
    let settings = SyncSettings { channel_name: "  ".to_owned(), ..SyncSettings::default() };
    let err = SyncConfig::from_settings(settings).expect_err("blank channel");
    assert!(matches!(err, ConfigError::EmptyChannelName));
}

#[test]
fn json_settings_fill_missing_fields_with_defaults() {
    let settings = SyncSettings::from_json(r#"{"login_route": "/member/login", "provider_hint": "naver"}"#).expect("json");
    assert_eq!(settings.login_route, "/member/login");
    assert_eq!(settings.channel_name, DEFAULT_CHANNEL_NAME);
    assert_eq!(settings.default_landing_path, DEFAULT_LANDING_PATH);

    let cfg = SyncConfig::from_settings(settings).expect("valid");
    assert!(cfg.policy.is_public_route("/member/login"));
    assert_eq!(cfg.provider_hint.as_deref(), Some("naver"));
}

#[test]
fn malformed_json_is_parse_error() {
    let err = SyncSettings::from_json("{").expect_err("malformed");
    assert!(matches!(err, ConfigError::Parse(_)));
}

use super::*;

#[test]
fn valid_settings_are_kept() {
    let settings = SyncSettings {
        channel_name: "tenant-auth".to_owned(),
        provider_hint: Some("kakao".to_owned()),
        ..SyncSettings::default()
    };
    let config = config_or_default(settings);
    assert_eq!(config.channel_name, "tenant-auth");
    assert_eq!(config.provider_hint.as_deref(), Some("kakao"));
}

#[test]
fn invalid_settings_fall_back_to_defaults() {
    let settings = SyncSettings { login_route: "https://evil.example.com/login".to_owned(), ..SyncSettings::default() };
    assert_eq!(config_or_default(settings), SyncConfig::default());
}

#[test]
fn unknown_keys_are_not_read() {
    assert_eq!(build_env("PATH_NOT_AUTHSYNC"), None);
}

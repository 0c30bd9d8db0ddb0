use super::{apply_env, apply_file, load_settings_with, parse_flag, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use shared::domain::DisablePolicy;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_ask_before_submitting() {
    let settings = Settings::default();
    assert!(settings.confirm_requests);
    assert_eq!(settings.disable_policy, DisablePolicy::Legacy);
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn file_overrides_only_the_keys_it_sets() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
        base_url = "http://dome.example/tcs/"
        disable_policy = "require-selection"
        "#,
    )
    .expect("apply file");

    assert_eq!(settings.base_url, "http://dome.example/tcs/");
    assert_eq!(settings.disable_policy, DisablePolicy::RequireSelection);
    assert!(settings.confirm_requests);
}

#[test]
fn file_with_unknown_key_is_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "confirmrequest = false").is_err());
}

#[test]
fn env_overrides_file_values() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "confirm_requests = true\nrequest_timeout_secs = 5")
        .expect("apply file");
    apply_env(
        &mut settings,
        env_from(&[
            ("TCS_BASE_URL", "http://10.0.0.2/tcs/alerts.html"),
            ("TCS_CONFIRM_REQUESTS", "off"),
            ("TCS_REQUEST_TIMEOUT_SECS", "0"),
        ]),
    );

    assert_eq!(settings.base_url, "http://10.0.0.2/tcs/alerts.html");
    assert!(!settings.confirm_requests);
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn unparsable_env_values_are_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("TCS_CONFIRM_REQUESTS", "maybe"),
            ("TCS_DISABLE_POLICY", "strict"),
            ("TCS_REQUEST_TIMEOUT_SECS", "soon"),
        ]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn timeout_from_env_becomes_duration() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_from(&[("TCS_REQUEST_TIMEOUT_SECS", " 30 ")]));
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn flags_accept_common_spellings() {
    assert_eq!(parse_flag("YES"), Some(true));
    assert_eq!(parse_flag("0"), Some(false));
    assert_eq!(parse_flag(""), None);
}

#[test]
fn explicit_config_path_must_exist() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let missing = env::temp_dir().join(format!("tcs_request_missing_{suffix}.toml"));

    let err = load_settings_with(Some(missing.as_path()), env_from(&[])).expect_err("must fail");
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn explicit_config_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("tcs_request_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("tcs-request.toml");
    fs::write(&path, "disable_policy = \"require-selection\"\n").expect("write config");

    let settings = load_settings_with(Some(path.as_path()), env_from(&[])).expect("load");
    assert_eq!(settings.disable_policy, DisablePolicy::RequireSelection);

    let settings = load_settings_with(
        Some(path.as_path()),
        env_from(&[("TCS_DISABLE_POLICY", "legacy")]),
    )
    .expect("load with env");
    assert_eq!(settings.disable_policy, DisablePolicy::Legacy);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_point_at_mainnet_aggregator() {
    let settings = Settings::default();
    assert_eq!(settings.api_base_url, "https://api.soroswap.finance");
    assert_eq!(settings.network, "mainnet");
    assert_eq!(settings.asset_list_name, "soroswap");
    assert_eq!(settings.execution_delay(), Duration::from_secs(2));
    assert_eq!(settings.wallet_public_key, None);
}

#[test]
fn file_overrides_accept_strings_and_integers() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
api_base_url = "http://localhost:9000"
network = "testnet"
asset_list = "aqua"
request_timeout_secs = 5
execution_delay_ms = "250"
"#,
    )
    .expect("parse");

    assert_eq!(settings.api_base_url, "http://localhost:9000");
    assert_eq!(settings.network, "testnet");
    assert_eq!(settings.asset_list_name, "aqua");
    assert_eq!(settings.request_timeout_secs, 5);
    assert_eq!(settings.execution_delay_ms, 250);
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file_overrides(&mut settings, "api_key = ").is_err());
}

#[test]
fn env_overrides_win_and_bad_numbers_are_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("SWAP_API_KEY", "sk_legacy"),
            ("APP__API_KEY", "sk_app"),
            ("APP__NETWORK", "testnet"),
            ("APP__REQUEST_TIMEOUT_SECS", "soon"),
            ("APP__EXECUTION_DELAY_MS", "10"),
            ("APP__WALLET_PUBLIC_KEY", "GABC"),
        ]),
    );

    assert_eq!(settings.api_key, "sk_app");
    assert_eq!(settings.network, "testnet");
    assert_eq!(settings.request_timeout_secs, 30);
    assert_eq!(settings.execution_delay_ms, 10);
    assert_eq!(settings.wallet_public_key.as_deref(), Some("GABC"));
}

#[test]
fn explicit_settings_file_must_exist() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let missing = env::temp_dir().join(format!("swap_desk_missing_{suffix}.toml"));

    let err = load_settings(Some(&missing)).expect_err("must fail");
    assert!(err.to_string().contains("failed to read settings file"));
}

#[test]
fn explicit_settings_file_is_applied() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("swap_desk_settings_{suffix}.toml"));
    fs::write(&path, "asset_list = \"custom\"\n").expect("write settings");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.asset_list_name, "custom");

    fs::remove_file(path).expect("cleanup");
}

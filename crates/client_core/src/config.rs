use std::{fs, path::Path, time::Duration};

use anyhow::Context;

pub const DEFAULT_SETTINGS_FILE: &str = "swap.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub api_key: String,
    pub network: String,
    pub asset_list_name: String,
    pub request_timeout_secs: u64,
    pub execution_delay_ms: u64,
    pub wallet_public_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.soroswap.finance".into(),
            api_key: String::new(),
            network: "mainnet".into(),
            asset_list_name: "soroswap".into(),
            request_timeout_secs: 30,
            execution_delay_ms: 2000,
            wallet_public_key: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn execution_delay(&self) -> Duration {
        Duration::from_millis(self.execution_delay_ms)
    }
}

/// Defaults, then `swap.toml` (or `path`), then environment.
///
/// A missing default file is fine; an explicitly requested file must exist.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
            apply_file_overrides(&mut settings, &raw)
                .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_SETTINGS_FILE) {
                if let Err(err) = apply_file_overrides(&mut settings, &raw) {
                    tracing::warn!("ignoring malformed {DEFAULT_SETTINGS_FILE}: {err:#}");
                }
            }
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let table: toml::Table = toml::from_str(raw)?;
    let text = |key: &str| -> Option<String> {
        match table.get(key)? {
            toml::Value::String(v) => Some(v.clone()),
            toml::Value::Integer(v) => Some(v.to_string()),
            _ => None,
        }
    };

    if let Some(v) = text("api_base_url") {
        settings.api_base_url = v;
    }
    if let Some(v) = text("api_key") {
        settings.api_key = v;
    }
    if let Some(v) = text("network") {
        settings.network = v;
    }
    if let Some(v) = text("asset_list") {
        settings.asset_list_name = v;
    }
    if let Some(v) = text("request_timeout_secs").and_then(|v| v.parse().ok()) {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = text("execution_delay_ms").and_then(|v| v.parse().ok()) {
        settings.execution_delay_ms = v;
    }
    if let Some(v) = text("wallet_public_key") {
        settings.wallet_public_key = Some(v);
    }

    Ok(())
}

pub fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SWAP_API_KEY") {
        settings.api_key = v;
    }
    if let Some(v) = var("APP__API_KEY") {
        settings.api_key = v;
    }

    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__NETWORK") {
        settings.network = v;
    }
    if let Some(v) = var("APP__ASSET_LIST") {
        settings.asset_list_name = v;
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
    if let Some(v) = var("APP__EXECUTION_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.execution_delay_ms = parsed;
        }
    }

    if let Some(v) = var("APP__WALLET_PUBLIC_KEY") {
        settings.wallet_public_key = Some(v);
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::DisablePolicy;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "tcs-request.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// URL of the control page; `request.cgi` is resolved relative to it.
    pub base_url: String,
    pub confirm_requests: bool,
    pub disable_policy: DisablePolicy,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1/tcs/".into(),
            confirm_requests: true,
            disable_policy: DisablePolicy::Legacy,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    base_url: Option<String>,
    confirm_requests: Option<bool>,
    disable_policy: Option<DisablePolicy>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the TOML file, then `TCS_*` environment variables.
///
/// An explicit `config_path` must exist; the default file in the working
/// directory is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    config_path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(error) if required => {
            return Err(error)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, lookup);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.base_url {
        settings.base_url = v;
    }
    if let Some(v) = file_cfg.confirm_requests {
        settings.confirm_requests = v;
    }
    if let Some(v) = file_cfg.disable_policy {
        settings.disable_policy = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("TCS_BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = lookup("TCS_CONFIRM_REQUESTS") {
        match parse_flag(&v) {
            Some(parsed) => settings.confirm_requests = parsed,
            None => warn!(value = %v, "ignoring unparsable TCS_CONFIRM_REQUESTS"),
        }
    }

    if let Some(v) = lookup("TCS_DISABLE_POLICY") {
        match v.parse() {
            Ok(parsed) => settings.disable_policy = parsed,
            Err(error) => warn!(%error, "ignoring TCS_DISABLE_POLICY"),
        }
    }

    if let Some(v) = lookup("TCS_REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(0) => settings.request_timeout_secs = None,
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(_) => warn!(value = %v, "ignoring unparsable TCS_REQUEST_TIMEOUT_SECS"),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

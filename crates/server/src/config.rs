use std::fs;

use anyhow::Context;
use calculator::EmissionFactors;
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "server.toml";
const FACTOR_ENV_PREFIX: &str = "APP__FACTOR_";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_bind: String,
    pub request_body_limit_bytes: usize,
    pub factors: EmissionFactors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5000".into(),
            request_body_limit_bytes: 64 * 1024,
            factors: EmissionFactors::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    bind_addr: Option<String>,
    request_body_limit_bytes: Option<usize>,
    factors: Option<EmissionFactors>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_config(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{SETTINGS_FILE}'"))?;
    }
    apply_env_overrides(&mut settings, std::env::vars())?;

    Ok(settings)
}

pub(crate) fn apply_file_config(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileConfig = toml::from_str(raw)?;
    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.request_body_limit_bytes {
        settings.request_body_limit_bytes = v;
    }
    if let Some(v) = file_cfg.factors {
        settings.factors = v;
    }
    Ok(())
}

/// `APP__*` variables win over their unprefixed forms regardless of order.
pub(crate) fn apply_env_overrides(
    settings: &mut Settings,
    vars: impl IntoIterator<Item = (String, String)>,
) -> anyhow::Result<()> {
    let mut bind = None;
    let mut prefixed_bind = None;

    for (key, value) in vars {
        match key.as_str() {
            "SERVER_BIND" => bind = Some(value),
            "APP__BIND_ADDR" => prefixed_bind = Some(value),
            "APP__REQUEST_BODY_LIMIT_BYTES" => {
                if let Ok(parsed) = value.parse::<usize>() {
                    settings.request_body_limit_bytes = parsed;
                }
            }
            _ => {
                if let Some(name) = key.strip_prefix(FACTOR_ENV_PREFIX) {
                    let factor = value
                        .parse::<f64>()
                        .with_context(|| format!("{key} must be a number, got '{value}'"))?;
                    settings.factors.set(name, factor)?;
                }
            }
        }
    }

    if let Some(v) = prefixed_bind.or(bind) {
        settings.server_bind = v;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

use std::{collections::HashMap, path::Path, time::Duration};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::SettingsError;

pub const SETTINGS_FILE: &str = "catalog_admin.toml";
/// Short alias for `APP__API_BASE_URL`; wins over every other source.
pub const API_URL_ENV: &str = "CATALOG_API_URL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    pub success_close_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://fakestoreapi.com".into(),
            page_size: 10,
            request_timeout_secs: 15,
            success_close_delay_ms: 1000,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn success_close_delay(&self) -> Duration {
        Duration::from_millis(self.success_close_delay_ms)
    }
}

/// Defaults, then the optional TOML file, then `APP__*` variables, then `CATALOG_API_URL`.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    build_settings(path.unwrap_or(Path::new(SETTINGS_FILE)), None)
}

pub(crate) fn build_settings(
    path: &Path,
    env: Option<HashMap<String, String>>,
) -> Result<Settings, SettingsError> {
    let api_url_alias = match &env {
        Some(vars) => vars.get(API_URL_ENV).cloned(),
        None => std::env::var(API_URL_ENV).ok(),
    };
    let defaults = Settings::default();

    let settings: Settings = Config::builder()
        .set_default("api_base_url", defaults.api_base_url)?
        .set_default("page_size", defaults.page_size as i64)?
        .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
        .set_default("success_close_delay_ms", defaults.success_close_delay_ms as i64)?
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .try_parsing(true)
                .source(env),
        )
        .set_override_option("api_base_url", api_url_alias.filter(|v| !v.trim().is_empty()))?
        .build()?
        .try_deserialize()?;

    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), SettingsError> {
    if settings.api_base_url.trim().is_empty() {
        return Err(SettingsError::Invalid {
            key: "api_base_url",
            reason: "must not be empty".into(),
        });
    }
    if settings.page_size == 0 {
        return Err(SettingsError::Invalid {
            key: "page_size",
            reason: "must be at least 1".into(),
        });
    }
    if settings.request_timeout_secs == 0 {
        return Err(SettingsError::Invalid {
            key: "request_timeout_secs",
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

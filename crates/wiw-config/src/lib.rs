//! Layered configuration for the When I Work MCP server.
//!
//! Reads configuration from multiple sources with precedence:
//! CLI flags > env vars > config file > defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wiw_api::{Credentials, DEFAULT_BASE_URL};
use wiw_types::ConfigError;

/// Environment variable names per setting, primary name first.
const API_KEY_VARS: &[&str] = &["WHENIWORK_API_KEY", "WHEN_I_WORK_API_KEY"];
const USERNAME_VARS: &[&str] = &["WHENIWORK_USERNAME", "WHEN_I_WORK_USERNAME"];
const PASSWORD_VARS: &[&str] = &["WHENIWORK_PASSWORD", "WHEN_I_WORK_PASSWORD"];
const TOKEN_VARS: &[&str] = &["WHENIWORK_TOKEN", "WHEN_I_WORK_TOKEN"];
const BASE_URL_VARS: &[&str] = &["WHENIWORK_BASE_URL"];
const ACCOUNT_ID_VARS: &[&str] = &["WHENIWORK_ACCOUNT_ID"];

/// Resolved configuration for one server process.
#[derive(Debug, Clone)]
pub struct WiwConfig {
    pub credentials: Credentials,
    pub config_dir: PathBuf,
}

/// Settings that can be read from a TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSettings {
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub base_url: Option<String>,
    pub account_id: Option<i64>,
}

/// CLI overrides that take highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub base_url: Option<String>,
    pub account_id: Option<i64>,
}

impl WiwConfig {
    /// Load configuration from all sources, applying precedence rules.
    ///
    /// Precedence (highest to lowest):
    /// 1. CLI flags
    /// 2. Environment variables
    /// 3. Config file (~/.wheniwork/config.toml)
    /// 4. Defaults
    pub fn load(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let config_dir = config_dir();
        let settings = load_settings_file(&config_dir.join("config.toml"));
        let credentials = resolve(overrides, |key| std::env::var(key).ok(), settings)?;
        Ok(WiwConfig {
            credentials,
            config_dir,
        })
    }
}

/// Merge the sources into validated credentials. `env` looks up one
/// environment variable.
fn resolve(
    overrides: CliOverrides,
    env: impl Fn(&str) -> Option<String>,
    settings: SettingsFile,
) -> Result<Credentials, ConfigError> {
    let from_env = |names: &[&str]| names.iter().find_map(|name| present(env(name)));
    let api = settings.api;

    let api_key = present(overrides.api_key)
        .or_else(|| from_env(API_KEY_VARS))
        .or_else(|| present(api.api_key))
        .ok_or_else(|| ConfigError::MissingKey {
            key: "api_key (set WHENIWORK_API_KEY or add to ~/.wheniwork/config.toml)".into(),
        })?;

    let username = present(overrides.username)
        .or_else(|| from_env(USERNAME_VARS))
        .or_else(|| present(api.username));
    let password = present(overrides.password)
        .or_else(|| from_env(PASSWORD_VARS))
        .or_else(|| present(api.password));
    let token = present(overrides.token)
        .or_else(|| from_env(TOKEN_VARS))
        .or_else(|| present(api.token));

    let base_url = present(overrides.base_url)
        .or_else(|| from_env(BASE_URL_VARS))
        .or_else(|| present(api.base_url))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let account_id = match overrides.account_id {
        Some(id) => Some(id),
        None => match from_env(ACCOUNT_ID_VARS) {
            Some(raw) => Some(raw.trim().parse::<i64>().map_err(|e| {
                ConfigError::InvalidValue {
                    key: ACCOUNT_ID_VARS[0].into(),
                    message: format!("'{raw}' is not an integer: {e}"),
                }
            })?),
            None => api.account_id,
        },
    };

    if token.is_none() && (username.is_none() || password.is_none()) {
        return Err(ConfigError::MissingCredentials);
    }

    Ok(Credentials {
        api_key,
        username,
        password,
        token,
        base_url,
        account_id,
    })
}

/// Empty and whitespace-only values count as unset.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Get the config directory path (~/.wheniwork/).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WHENIWORK_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".wheniwork")
}

/// Load and parse a TOML settings file, returning defaults on any error.
fn load_settings_file(path: &std::path::Path) -> SettingsFile {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse {}: {}", path.display(), e);
            SettingsFile::default()
        }),
        Err(_) => SettingsFile::default(),
    }
}

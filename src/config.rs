//! Application-level configuration loading: tunables from a JSON file and store
//! credentials from the environment.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "ARCADE_SCORES_CONFIG_PATH";
/// Environment variable holding the store base URL.
const STORE_URL_ENV: &str = "SUPABASE_URL";
/// Environment variable holding the store access key.
const STORE_KEY_ENV: &str = "SUPABASE_ANON_KEY";
/// Non-functional values substituted when the store is not configured.
const PLACEHOLDER_STORE_URL: &str = "https://placeholder.supabase.co";
const PLACEHOLDER_STORE_KEY: &str = "placeholder-key";

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "arcade-scores";
/// Version reported by the health endpoint.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Entries returned by the leaderboard when no limit is requested.
    pub leaderboard_default_limit: u32,
    /// Age after which an unfinished session is abandoned.
    pub session_ttl: Duration,
    /// Per-request timeout applied by the store HTTP client.
    pub store_timeout: Duration,
    /// Connection details for the external score store.
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load tunables from disk and store credentials from the environment.
    ///
    /// Neither source is allowed to abort startup: an unreadable file falls back to
    /// defaults and missing credentials fall back to placeholders.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let file = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration file");
                    raw
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    RawConfig::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                RawConfig::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                RawConfig::default()
            }
        };

        Self::from_parts(file, StoreConfig::from_env())
    }

    fn from_parts(raw: RawConfig, store: StoreConfig) -> Self {
        let defaults = Self::default();
        Self {
            leaderboard_default_limit: raw
                .leaderboard_default_limit
                .filter(|limit| (1..=100).contains(limit))
                .unwrap_or(defaults.leaderboard_default_limit),
            session_ttl: raw
                .session_ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
            store_timeout: raw
                .store_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.store_timeout),
            store,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            leaderboard_default_limit: 10,
            session_ttl: Duration::from_secs(2 * 60 * 60),
            store_timeout: Duration::from_secs(10),
            store: StoreConfig::placeholder(),
        }
    }
}

/// Connection details for the hosted score database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Project URL, without the `/rest/v1` suffix.
    pub url: String,
    /// Public API key sent as `apikey` and bearer token.
    pub anon_key: String,
    /// False when placeholders were substituted for missing values.
    pub configured: bool,
}

impl StoreConfig {
    /// Configuration for a real project.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            configured: true,
        }
    }

    /// Non-functional configuration; a store built from it stays degraded.
    pub fn placeholder() -> Self {
        Self {
            url: PLACEHOLDER_STORE_URL.into(),
            anon_key: PLACEHOLDER_STORE_KEY.into(),
            configured: false,
        }
    }

    /// Read the store variables, warning and substituting placeholders when absent.
    pub fn from_env() -> Self {
        Self::from_values(non_empty_var(STORE_URL_ENV), non_empty_var(STORE_KEY_ENV))
    }

    fn from_values(url: Option<String>, anon_key: Option<String>) -> Self {
        match (url, anon_key) {
            (Some(url), Some(anon_key)) => Self::new(url, anon_key),
            (url, anon_key) => {
                warn!(
                    url_present = url.is_some(),
                    key_present = anon_key.is_some(),
                    "missing {STORE_URL_ENV} or {STORE_KEY_ENV}; score store is disabled"
                );
                Self::placeholder()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    leaderboard_default_limit: Option<u32>,
    session_ttl_secs: Option<u64>,
    store_timeout_secs: Option<u64>,
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

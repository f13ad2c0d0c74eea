//! Configuration management for the Spotify resolver.
//!
//! Settings come from a JSON file (by default
//! `~/.config/spotify-resolver/config.json`) layered over built-in defaults.
//! Credentials and endpoints can additionally be supplied through environment
//! variables, which may live in a `.env` file next to the config file:
//!
//! 1. Environment variables (highest priority)
//! 2. `config.json` (or the file passed with `--config`)
//! 3. Application defaults
//!
//! The file is never required. A missing file yields the defaults, a
//! malformed one is reported as a warning and also yields the defaults.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::{
    Res,
    error::ResolverError,
    types::Credentials,
    warning,
};

pub const APP_NAME: &str = "spotify-resolver";

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
/// Per-request timeout used when the configured one is unusable.
pub const DEFAULT_TIMEOUT: f64 = 10.0;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Runtime settings shared read-only by every HTTP call of a run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout: f64,
    pub max_retries: u32,
    /// Backoff factor in seconds.
    pub retry_delay: f64,
    pub default_market: String,
    pub user_agent: String,
    pub log_level: String,
    /// Accepted for compatibility with existing config files; results are
    /// never cached.
    pub cache_results: bool,
    pub cache_file: Option<PathBuf>,
    pub api_url: String,
    pub token_url: String,

    /// Where the settings were read from, used in diagnostics.
    #[serde(skip)]
    pub source: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: 3,
            retry_delay: 1.0,
            default_market: "US".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: "INFO".to_string(),
            cache_results: true,
            cache_file: Some(config_dir().join("cache.json")),
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            source: default_config_path(),
        }
    }
}

impl Config {
    /// Loads the configuration file and applies environment overrides.
    ///
    /// # Arguments
    ///
    /// * `path` - Explicit config file; falls back to [`default_config_path`]
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::load(None).await;
    /// let credentials = config.credentials()?;
    /// ```
    pub async fn load(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);

        let mut config = match async_fs::read_to_string(&path).await {
            Ok(content) => match Self::from_json(&content) {
                Ok(config) => config,
                Err(e) => {
                    warning!("Error loading config {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::debug!("No config at {}: {}", path.display(), e);
                Self::default()
            }
        };

        config.source = path;
        config.apply_env();
        config
    }

    /// Parses a JSON config document; absent keys keep their defaults.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    fn apply_env(&mut self) {
        if let Some(v) = env_value("SPOTIFY_CLIENT_ID") {
            self.client_id = Some(v);
        }
        if let Some(v) = env_value("SPOTIFY_CLIENT_SECRET") {
            self.client_secret = Some(v);
        }
        if let Some(v) = env_value("SPOTIFY_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = env_value("SPOTIFY_API_TOKEN_URL") {
            self.token_url = v;
        }
    }

    /// Returns the client credentials or the missing-credentials error.
    ///
    /// Empty strings count as missing.
    pub fn credentials(&self) -> Res<Credentials> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Ok(Credentials {
                client_id: id.to_string(),
                client_secret: secret.to_string(),
            }),
            _ => Err(ResolverError::MissingCredentials(self.source.clone())),
        }
    }

    /// Negative values count as zero; values too large for a [`Duration`]
    /// fall back to [`DEFAULT_TIMEOUT`].
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout.max(0.0)).unwrap_or_else(|_| {
            warning!(
                "Ignoring invalid timeout {}, using {} seconds",
                self.timeout,
                DEFAULT_TIMEOUT
            );
            Duration::from_secs_f64(DEFAULT_TIMEOUT)
        })
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Loads environment variables from a `.env` file in the config directory.
///
/// A missing file is not an error; only an unreadable or malformed one is.
pub async fn load_env() -> Result<(), String> {
    let path = config_dir().join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// `~/.config/spotify-resolver` on every platform.
pub fn config_dir() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push(APP_NAME);
    path
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let config = Config::from_json(r#"{"client_id": "abc", "max_retries": 5}"#).unwrap();

        assert_eq!(config.client_id.as_deref(), Some("abc"));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout, 10.0);
        assert_eq!(config.default_market, "US");
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn fractional_delays_are_accepted() {
        let config = Config::from_json(r#"{"timeout": 2.5, "retry_delay": 0.3}"#).unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.retry_delay, 0.3);
    }

    #[test]
    fn oversized_timeout_falls_back_to_default() {
        let config = Config::from_json(r#"{"timeout": 1e20}"#).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs_f64(DEFAULT_TIMEOUT));

        let config = Config::from_json(r#"{"timeout": -3}"#).unwrap();
        assert_eq!(config.timeout(), Duration::ZERO);

        let config = Config {
            timeout: f64::INFINITY,
            ..Config::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs_f64(DEFAULT_TIMEOUT));
    }

    #[test]
    fn oversized_values_still_build_a_session() {
        let config = Config::from_json(r#"{"timeout": 1e20, "retry_delay": 1e300}"#).unwrap();
        let session = crate::spotify::Session::new(&config).unwrap();
        let policy = session.retry_policy();
        assert_eq!(policy.backoff(2), Duration::from_secs(120));
        assert_eq!(policy.backoff(40), Duration::from_secs(120));
    }

    #[test]
    fn credentials_require_both_values() {
        let config = Config {
            client_id: Some("id".to_string()),
            client_secret: None,
            ..Config::default()
        };
        assert!(matches!(
            config.credentials(),
            Err(ResolverError::MissingCredentials(_))
        ));

        let config = Config {
            client_id: Some("id".to_string()),
            client_secret: Some(String::new()),
            ..Config::default()
        };
        assert!(config.credentials().is_err());

        let config = Config {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            ..Config::default()
        };
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.client_id, "id");
        assert_eq!(credentials.client_secret, "secret");
    }

    #[test]
    fn null_credentials_parse_as_missing() {
        let config =
            Config::from_json(r#"{"client_id": null, "client_secret": null}"#).unwrap();
        assert!(config.credentials().is_err());
    }
}

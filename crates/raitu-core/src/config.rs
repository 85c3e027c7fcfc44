//! Persisted config (endpoint, API key, default language) in the app data directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app_data;
use crate::client::{ApiClient, ClientError};
use crate::i18n::Language;

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the remote functions host, e.g. `https://host/functions/v1`.
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    /// Language the UI starts in.
    pub language: Language,
}

impl Config {
    /// Build a client for the configured endpoint.
    pub fn client(&self) -> Result<ApiClient, ConfigError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::NoEndpoint)?;
        ApiClient::from_url(endpoint, self.api_key.clone()).map_err(ConfigError::Client)
    }

    /// Set the endpoint. The URL must parse; on error the config is unchanged.
    pub fn set_endpoint(&mut self, url: &str) -> Result<(), ConfigError> {
        url::Url::parse(url).map_err(ConfigError::InvalidEndpoint)?;
        self.endpoint = Some(url.to_string());
        Ok(())
    }
}

/// Path of the config file, if the app data directory is available.
pub fn config_path() -> Option<PathBuf> {
    app_data::app_data_dir().map(|d| d.join(CONFIG_FILENAME))
}

/// Load config from the app data directory. Returns default config if missing or invalid.
pub fn load_config() -> Config {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Config::default(),
    }
}

/// Load config from `path`. Returns default config if missing or invalid.
pub fn load_config_from(path: &Path) -> Config {
    let Ok(s) = std::fs::read_to_string(path) else {
        return Config::default();
    };
    match toml::from_str(&s) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
            Config::default()
        }
    }
}

/// Save config to the app data directory.
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoDataDir)?;
    save_config_to(&path, config)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let s = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;
    std::fs::write(path, s).map_err(ConfigError::Write)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine app data directory")]
    NoDataDir,
    #[error("no endpoint configured (run `raitu config --endpoint <URL>`)")]
    NoEndpoint,
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(url::ParseError),
    #[error("failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("failed to write config: {0}")]
    Write(std::io::Error),
    #[error(transparent)]
    Client(ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        let config = Config {
            endpoint: Some("https://example.test/functions/v1".into()),
            api_key: Some("anon".into()),
            language: Language::Te,
        };
        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config_from(&dir.path().join("nope.toml")), Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str("language = \"te\"").unwrap();
        assert_eq!(config.language, Language::Te);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(toml::from_str::<Config>("language = \"fr\"").is_err());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "language = \"fr\"").unwrap();
        assert_eq!(load_config_from(&path), Config::default());
    }

    #[test]
    fn set_endpoint_validates_url() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_endpoint("not a url"),
            Err(ConfigError::InvalidEndpoint(_))
        ));
        assert!(config.endpoint.is_none());
        config.set_endpoint("https://example.test/functions/v1").unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("https://example.test/functions/v1"));
    }

    #[test]
    fn client_requires_endpoint() {
        assert!(matches!(Config::default().client(), Err(ConfigError::NoEndpoint)));
        let config = Config {
            endpoint: Some("http://localhost:54321/functions/v1".into()),
            ..Config::default()
        };
        assert!(config.client().is_ok());
    }
}

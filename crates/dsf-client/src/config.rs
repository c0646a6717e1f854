//! Client configuration.
//!
//! A [`ClientConfig`] is built once at startup (defaults, then an optional
//! TOML file, then command-line overrides) and turned into an
//! [`ApiClient`](crate::ApiClient) that is passed to everything that issues
//! requests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Default API root of a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// File name looked up in the user's config directory.
pub const CONFIG_FILE_NAME: &str = "client.toml";

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("dsf-client/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the backend API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root including the version prefix, e.g. `http://localhost:8000/api/v1`.
    pub base_url: String,

    /// Request timeout in seconds. `None` keeps the HTTP library default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: USER_AGENT_VALUE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Io(format!("{}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| ApiError::InvalidConfig(format!("{}: {e}", path.display())))
    }

    /// Load configuration from `explicit` if given, otherwise from the default
    /// config file when it exists, otherwise use defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading client config from {}", path.display());
                Self::load_from(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Default config file location (`<config dir>/client.toml`).
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "DiseaseSupportFinder", "dsf")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    /// Request timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Parse and check the base URL.
    ///
    /// Only `http` and `https` are accepted. A trailing slash is removed so
    /// endpoint segments can be appended uniformly.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|e| ApiError::InvalidConfig(format!("base_url {trimmed:?}: {e}")))?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ApiError::InvalidConfig(format!(
                    "base_url must use http or https, got {other}"
                )));
            }
        }
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidConfig(format!(
                "base_url {trimmed:?} cannot carry a path"
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout().is_none());
        assert!(config.user_agent.starts_with("dsf-client/"));
    }

    #[test]
    fn test_parsed_base_url_trims_slash() {
        let config = ClientConfig::default().with_base_url("http://backend:9000/api/v1/");
        let url = config.parsed_base_url().unwrap();
        assert_eq!(url.as_str(), "http://backend:9000/api/v1");
    }

    #[test]
    fn test_parsed_base_url_rejects_other_schemes() {
        let config = ClientConfig::default().with_base_url("ftp://backend/api/v1");
        assert!(matches!(
            config.parsed_base_url(),
            Err(ApiError::InvalidConfig(_))
        ));

        let config = ClientConfig::default().with_base_url("not a url");
        assert!(config.parsed_base_url().is_err());
    }

    #[test]
    fn test_timeout_override_keeps_existing_when_none() {
        let config = ClientConfig::default()
            .with_timeout_secs(Some(30))
            .with_timeout_secs(None);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "base_url = \"http://10.0.0.5:8000/api/v1\"\ntimeout_secs = 15\n")
            .unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:8000/api/v1");
        assert_eq!(config.timeout_secs, Some(15));
        assert!(config.user_agent.starts_with("dsf-client/"));
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "base_url = [").unwrap();

        assert!(matches!(
            ClientConfig::load_from(&path),
            Err(ApiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_discover_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            ClientConfig::discover(Some(&path)),
            Err(ApiError::Io(_))
        ));
    }
}

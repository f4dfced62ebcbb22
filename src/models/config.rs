//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client and endpoint settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Leaderboard pagination behavior
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration if the file exists, defaults otherwise.
    ///
    /// Unlike [`Config::load_or_default`], a file that exists but cannot be
    /// read or parsed is an error.
    pub fn load_if_exists(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load(path)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.client.user_agent.trim().is_empty() {
            return Err(AppError::validation("client.user_agent is empty"));
        }
        if self.client.timeout_secs == 0 {
            return Err(AppError::validation("client.timeout_secs must be > 0"));
        }
        Url::parse(&self.client.base_url).map_err(|e| {
            AppError::validation(format!(
                "client.base_url '{}' is not a valid URL: {e}",
                self.client.base_url
            ))
        })?;
        Url::parse(&self.client.export_url).map_err(|e| {
            AppError::validation(format!(
                "client.export_url '{}' is not a valid URL: {e}",
                self.client.export_url
            ))
        })?;
        Ok(())
    }
}

/// HTTP client and endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Site root used to build leaderboard URLs
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Export index page; export hrefs are resolved against it
    #[serde(default = "defaults::export_url")]
    pub export_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            base_url: defaults::base_url(),
            export_url: defaults::export_url(),
        }
    }
}

/// Leaderboard pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Treat a page without a ranking table as the end of the leaderboard.
    ///
    /// When `false`, a missing table is reported as a not-found error and only
    /// a table without data rows ends the sequence.
    #[serde(default = "defaults::missing_table_ends")]
    pub missing_table_ends: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            missing_table_ends: defaults::missing_table_ends(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        concat!("wowprogress-rs/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn base_url() -> String {
        "https://www.wowprogress.com".into()
    }
    pub fn export_url() -> String {
        "https://www.wowprogress.com/export/ranks/".into()
    }
    pub fn missing_table_ends() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.client.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.client.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.client.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[client]\nbase_url = \"http://localhost:8080\"\n\n[pagination]\nmissing_table_ends = false"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.client.base_url, "http://localhost:8080");
        assert_eq!(config.client.timeout_secs, 30);
        assert_eq!(
            config.client.export_url,
            "https://www.wowprogress.com/export/ranks/"
        );
        assert!(!config.pagination.missing_table_ends);
    }

    #[test]
    fn load_if_exists_rejects_broken_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[client\ntimeout_secs = ").unwrap();

        assert!(matches!(
            Config::load_if_exists(file.path()),
            Err(AppError::Toml(_))
        ));
    }

    #[test]
    fn load_if_exists_defaults_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_if_exists(dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.client.timeout_secs, 30);
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml"));
        assert!(config.pagination.missing_table_ends);
        assert_eq!(config.client.base_url, "https://www.wowprogress.com");
    }
}

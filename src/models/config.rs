//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SiteSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and scraping behavior settings
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// Location of the flat-file catalog
    #[serde(default)]
    pub storage: StorageConfig,

    /// Query API settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
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
        if self.scraper.user_agent.trim().is_empty() {
            return Err(AppError::validation("scraper.user_agent is empty"));
        }
        if self.scraper.timeout_secs == 0 {
            return Err(AppError::validation("scraper.timeout_secs must be > 0"));
        }
        let base = url::Url::parse(&self.scraper.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "scraper.base_url must be http(s), got {}",
                self.scraper.base_url
            )));
        }
        for (key, selector) in self.scraper.selectors.entries() {
            scraper::Selector::parse(selector).map_err(|e| {
                AppError::selector(selector, format!("scraper.selectors.{key}: {e:?}"))
            })?;
        }
        if self.storage.source_file.as_os_str().is_empty() {
            return Err(AppError::validation("storage.source_file is empty"));
        }
        if self.server.port == 0 {
            return Err(AppError::validation("server.port must be > 0"));
        }
        if self.server.default_limit == 0 {
            return Err(AppError::validation("server.default_limit must be > 0"));
        }
        Ok(())
    }
}

/// What the scraper does when a single listing entry cannot be extracted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemErrorPolicy {
    /// Abort the whole run; nothing is written.
    #[default]
    Abort,
    /// Log the entry and continue with the next one.
    Skip,
}

/// HTTP client and scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Site root; category discovery starts here and image paths hang off it
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Pause between consecutive pages of one category, in milliseconds
    #[serde(default = "defaults::page_delay")]
    pub page_delay_ms: u64,

    /// Behavior when one listing entry fails to extract
    #[serde(default)]
    pub on_item_error: ItemErrorPolicy,

    /// Listing structure of the upstream site
    #[serde(default)]
    pub selectors: SiteSelectors,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            page_delay_ms: defaults::page_delay(),
            on_item_error: ItemErrorPolicy::default(),
            selectors: SiteSelectors::default(),
        }
    }
}

/// Flat-file storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// CSV file the scraper writes and the API reads
    #[serde(default = "defaults::source_file")]
    pub source_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            source_file: defaults::source_file(),
        }
    }
}

/// Query API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub host: String,

    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Page size for `/list` when the request omits `limit`
    #[serde(default = "defaults::default_limit")]
    pub default_limit: usize,

    /// Log every request path and response status
    #[serde(default = "defaults::log_requests")]
    pub log_requests: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            default_limit: defaults::default_limit(),
            log_requests: defaults::log_requests(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

mod defaults {
    use std::path::PathBuf;

    // Scraper defaults
    pub fn base_url() -> String {
        "https://books.toscrape.com/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; book-catalog/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn page_delay() -> u64 {
        1000
    }

    // Storage defaults
    pub fn source_file() -> PathBuf {
        PathBuf::from("data/books.csv")
    }

    // Server defaults
    pub fn host() -> String {
        "127.0.0.1".into()
    }
    pub fn port() -> u16 {
        8000
    }
    pub fn default_limit() -> usize {
        20
    }
    pub fn log_requests() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.scraper.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let mut config = Config::default();
        config.scraper.selectors.item = "[[invalid".to_string();
        assert!(matches!(
            config.validate(),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn validate_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.scraper.base_url = "ftp://books.toscrape.com/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scraper]
            page_delay_ms = 0
            on_item_error = "skip"

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.scraper.page_delay_ms, 0);
        assert_eq!(config.scraper.on_item_error, ItemErrorPolicy::Skip);
        assert_eq!(config.scraper.base_url, "https://books.toscrape.com/");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.default_limit, 20);
        assert_eq!(config.storage.source_file, PathBuf::from("data/books.csv"));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let config = Config::load_or_default("does/not/exist.toml");
        assert_eq!(config.server.port, 8000);
    }
}

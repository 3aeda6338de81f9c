//! # Catalog Configuration
//!
//! Where the product API lives and how long lookups stay fresh.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by the binary)       │
//! │     --api-url https://dummyjson.com                                    │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SHOPFRONT_API_URL=https://dummyjson.com                            │
//! │     SHOPFRONT_TIMEOUT_SECS=10                                          │
//! │     SHOPFRONT_STALE_SECS=300                                           │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <PATH>, or                                                │
//! │     ~/.config/shopfront/shopfront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.shopfront.shopfront/ (macOS)     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "https://dummyjson.com"
//! timeout_secs = 10
//!
//! [cache]
//! stale_after_secs = 300
//!
//! [display]
//! currency_symbol = "$"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::ConfigError;

/// Environment override for `api.base_url`.
pub const ENV_API_URL: &str = "SHOPFRONT_API_URL";
/// Environment override for `api.timeout_secs`.
pub const ENV_TIMEOUT_SECS: &str = "SHOPFRONT_TIMEOUT_SECS";
/// Environment override for `cache.stale_after_secs`.
pub const ENV_STALE_SECS: &str = "SHOPFRONT_STALE_SECS";

const CONFIG_FILE_NAME: &str = "shopfront.toml";

// =============================================================================
// Sections
// =============================================================================

/// Product API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Catalog root. Products live under `{base_url}/products/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://dummyjson.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Request cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// How long a successful lookup is served from cache (seconds).
    /// 0 refetches on every lookup that is not already in flight.
    #[serde(default = "default_stale_after")]
    pub stale_after_secs: u64,
}

fn default_stale_after() -> u64 {
    300
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            stale_after_secs: default_stale_after(),
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Catalog Config
// =============================================================================

/// Complete configuration for the catalog and the page that shows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl CatalogConfig {
    /// Loads configuration from file, environment and defaults.
    ///
    /// An explicit `path` must exist. Without one, the platform config file
    /// is used when present and silently skipped when not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::read(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validated()
    }

    /// The file layer alone: no environment overrides, no validation.
    ///
    /// Callers layering their own overrides on top finish with
    /// [`CatalogConfig::validated`].
    pub fn read(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(CatalogConfig::default())
                }
            },
        }
    }

    /// Validates the fully layered configuration and logs the result.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;

        info!(
            base_url = %self.api.base_url,
            timeout_secs = self.api.timeout_secs,
            stale_after_secs = self.cache.stale_after_secs,
            "Catalog configuration loaded"
        );
        Ok(self)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Platform config file location, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "shopfront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Applies environment overrides through `lookup`.
    ///
    /// `lookup` maps a variable name to its value, e.g.
    /// `|key| std::env::var(key).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.api.timeout_secs = parse_secs(ENV_TIMEOUT_SECS, &raw)?;
        }

        if let Some(raw) = lookup(ENV_STALE_SECS) {
            self.cache.stale_after_secs = parse_secs(ENV_STALE_SECS, &raw)?;
        }

        Ok(())
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "api.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// The parsed catalog root URL. Only http and https are accepted.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "api.base_url".to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidValue {
                key: "api.base_url".to_string(),
                reason: format!("unsupported scheme '{}'", other),
            }),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.cache.stale_after_secs)
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("'{}' is not a number of seconds: {}", raw, e),
        })
}

//! # Configuration State
//!
//! Stores the page configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--api-url`)
//! 2. Environment variables (`SHOPFRONT_*`)
//! 3. Config file (`shopfront.toml`)
//! 4. Defaults
//!
//! Every layer is applied before anything is validated, so a valid flag
//! replaces a bad file or environment value instead of failing on it.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use shopfront_catalog::{CatalogConfig, ConfigError};
use shopfront_core::Money;

/// Page configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    pub catalog: CatalogConfig,
}

impl ConfigState {
    /// Loads the catalog configuration and applies command-line overrides.
    pub fn load(path: Option<&Path>, api_url: Option<&str>) -> Result<Self, ConfigError> {
        let catalog = CatalogConfig::read(path)?;
        Self::layered(catalog, |key| std::env::var(key).ok(), api_url)
    }

    /// Applies environment overrides through `lookup`, then the flags.
    pub fn layered<F>(
        mut catalog: CatalogConfig,
        lookup: F,
        api_url: Option<&str>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        catalog.apply_env(lookup)?;
        Self::with_overrides(catalog, api_url)
    }

    /// Applies command-line overrides to an already loaded configuration
    /// and validates the result.
    pub fn with_overrides(
        mut catalog: CatalogConfig,
        api_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = api_url {
            debug!(api_url = url, "Overriding catalog URL from command line");
            catalog.api.base_url = url.to_string();
        }

        Ok(ConfigState {
            catalog: catalog.validated()?,
        })
    }

    /// Formats an amount with the configured currency symbol.
    pub fn format_price(&self, amount: Money) -> String {
        amount.format_with(&self.catalog.display.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_catalog::config::ENV_API_URL;

    #[test]
    fn test_default_formats_dollars() {
        let config = ConfigState::default();
        assert_eq!(config.format_price(Money::from_cents(19998)), "$199.98");
    }

    #[test]
    fn test_custom_symbol() {
        let mut catalog = CatalogConfig::default();
        catalog.display.currency_symbol = "€".to_string();

        let config = ConfigState::with_overrides(catalog, None).unwrap();
        assert_eq!(config.format_price(Money::from_cents(500)), "€5.00");
    }

    #[test]
    fn test_api_url_override() {
        let config =
            ConfigState::with_overrides(CatalogConfig::default(), Some("http://127.0.0.1:9000"))
                .unwrap();
        assert_eq!(config.catalog.api.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_flag_replaces_invalid_env_url() {
        let env = |key: &str| (key == ENV_API_URL).then(|| "not a url".to_string());

        let config =
            ConfigState::layered(CatalogConfig::default(), env, Some("http://127.0.0.1:9000"))
                .unwrap();
        assert_eq!(config.catalog.api.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_env_url_rejected_without_flag() {
        let env = |key: &str| (key == ENV_API_URL).then(|| "not a url".to_string());

        let result = ConfigState::layered(CatalogConfig::default(), env, None);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_flag_replaces_invalid_file_url() {
        let mut catalog = CatalogConfig::default();
        catalog.api.base_url = "ftp://catalog".to_string();

        let config = ConfigState::with_overrides(catalog, Some("http://127.0.0.1:9000")).unwrap();
        assert_eq!(config.catalog.api.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = ConfigState::with_overrides(CatalogConfig::default(), Some("ftp://catalog"));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}

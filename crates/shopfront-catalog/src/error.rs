//! # Catalog Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Lookup        │  │   Transport     │  │   Record                │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotFound       │  │  Transport      │  │  Decode                 │ │
//! │  │  Status         │  │  InvalidUrl     │  │  InvalidProduct         │ │
//! │  │  Abandoned      │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  ConfigError: Read / Parse / InvalidValue (startup only)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CatalogError` is `Clone`: one in-flight lookup hands the same result to
//! every waiter, failures included.

use std::path::PathBuf;

use shopfront_core::{CoreError, ProductId};
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Why a product lookup failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// The catalog has no product with this id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The catalog answered with an unexpected HTTP status.
    #[error("Catalog returned HTTP {status} for product {id}")]
    Status { id: ProductId, status: u16 },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body was not a product record.
    #[error("Could not decode product {id}: {reason}")]
    Decode { id: ProductId, reason: String },

    /// The record decoded but broke a domain rule.
    #[error(transparent)]
    InvalidProduct(#[from] CoreError),

    /// The configured catalog URL cannot address products.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// The lookup task ended without delivering a result.
    #[error("Lookup for product {0} was abandoned")]
    Abandoned(ProductId),
}

impl CatalogError {
    /// Whether the error means "no such product" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Transport(err.to_string())
    }
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A setting has an unusable value.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::ValidationError;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CatalogError::NotFound(ProductId(3)).to_string(),
            "Product not found: 3"
        );
        assert_eq!(
            CatalogError::Status {
                id: ProductId(3),
                status: 503
            }
            .to_string(),
            "Catalog returned HTTP 503 for product 3"
        );
    }

    #[test]
    fn test_core_error_converts() {
        let core = CoreError::InvalidProduct {
            id: ProductId(1),
            source: ValidationError::Required {
                field: "title".to_string(),
            },
        };
        let err: CatalogError = core.into();
        assert!(matches!(err, CatalogError::InvalidProduct(_)));
        assert!(!err.is_not_found());
    }
}

//! # Page Error Type
//!
//! Unified error type for the product page and its commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Product Page                       │
//! │                                                                         │
//! │  Catalog lookup fails ──► FetchState::Failed ──► components degrade    │
//! │                                (never an Err)        (placeholders,     │
//! │                                                       no-op button)     │
//! │                                                                         │
//! │  Cart context without ──► PageError::MissingCartProvider               │
//! │  a provider                   (programming error, surfaced at once)    │
//! │                                                                         │
//! │  Bad config ────────────► PageError::Config                            │
//! │                                                                         │
//! │  Command wants a product ► PageError::Catalog (after the page has      │
//! │  that never arrived           rendered its degraded state)             │
//! │                                                                         │
//! │  main: PageError ─► "[CODE] message" on stderr ─► non-zero exit        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopfront_catalog::{CatalogError, ConfigError};
use thiserror::Error;

/// Result alias for page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Everything that can go wrong above the cart.
#[derive(Debug, Error)]
pub enum PageError {
    /// A component asked for the cart outside any mounted `CartProvider`.
    #[error("Cart context requested outside of a CartProvider; mount one around the page")]
    MissingCartProvider,

    /// The product lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Anything else (runtime setup, output).
    #[error("{0}")]
    Internal(String),
}

/// Machine-readable error codes for `--json` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Cart context used without a provider
    MissingCartProvider,

    /// Product does not exist
    NotFound,

    /// Product lookup failed for any other reason
    FetchFailed,

    /// Configuration is unusable
    ConfigError,

    /// Internal error
    Internal,
}

impl PageError {
    pub fn internal(message: impl Into<String>) -> Self {
        PageError::Internal(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PageError::MissingCartProvider => ErrorCode::MissingCartProvider,
            PageError::Catalog(err) if err.is_not_found() => ErrorCode::NotFound,
            PageError::Catalog(_) => ErrorCode::FetchFailed,
            PageError::Config(_) => ErrorCode::ConfigError,
            PageError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self.code() {
            ErrorCode::NotFound => 3,
            ErrorCode::FetchFailed => 4,
            ErrorCode::ConfigError => 78,
            ErrorCode::MissingCartProvider | ErrorCode::Internal => 70,
        }
    }

    /// Serializable form for `--json` output.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// What `--json` prints when a command fails.
///
/// ```json
/// { "code": "NOT_FOUND", "message": "Product not found: 404" }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::ProductId;

    #[test]
    fn test_codes() {
        assert_eq!(
            PageError::MissingCartProvider.code(),
            ErrorCode::MissingCartProvider
        );
        assert_eq!(
            PageError::from(CatalogError::NotFound(ProductId(1))).code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            PageError::from(CatalogError::Transport("reset".into())).code(),
            ErrorCode::FetchFailed
        );
    }

    #[test]
    fn test_report_serializes_screaming_code() {
        let report = PageError::from(CatalogError::NotFound(ProductId(404))).report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 404");
        assert_eq!(report.to_string(), "[NotFound] Product not found: 404");
    }
}

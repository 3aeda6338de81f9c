//! # Product Sources
//!
//! Where product records come from.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    HTTP Product Lookup                                  │
//! │                                                                         │
//! │  fetch_product(ProductId(1))                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET {base_url}/products/1          (timeout from config)              │
//! │       │                                                                 │
//! │       ├── transport error ──────────► CatalogError::Transport          │
//! │       ├── 404 ──────────────────────► CatalogError::NotFound           │
//! │       ├── other non-2xx ────────────► CatalogError::Status             │
//! │       ▼                                                                 │
//! │  serde_json::from_str::<Product>                                       │
//! │       ├── bad body ─────────────────► CatalogError::Decode             │
//! │       ▼                                                                 │
//! │  validate_product                                                       │
//! │       ├── rule broken ──────────────► CatalogError::InvalidProduct     │
//! │       ▼                                                                 │
//! │  Ok(Product)                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

use shopfront_core::validation::validate_product;
use shopfront_core::{Product, ProductId};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

/// Anything that can look a product up by id.
///
/// [`QueryClient`](crate::QueryClient) caches on top of any implementation.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product>;
}

/// Product source backed by the remote catalog's REST API.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    http: Client,
    base_url: Url,
}

impl HttpProductSource {
    /// Creates a source rooted at `base_url`.
    pub fn new(base_url: Url, timeout: Duration) -> CatalogResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpProductSource { http, base_url })
    }

    /// Creates a source from loaded configuration.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        let base_url = config
            .base_url()
            .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        Self::new(base_url, config.timeout())
    }

    /// `{base_url}/products/{id}`, keeping any path prefix on the base.
    pub fn product_url(&self, id: ProductId) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("products")
            .push(&id.to_string());
        Ok(url)
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
        let start = Instant::now();
        let url = self.product_url(id)?;
        debug!(%id, %url, "Fetching product");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!(%id, "Product not found in catalog");
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            warn!(%id, status = status.as_u16(), "Catalog returned error status");
            return Err(CatalogError::Status {
                id,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let product: Product = serde_json::from_str(&body).map_err(|e| CatalogError::Decode {
            id,
            reason: e.to_string(),
        })?;
        validate_product(&product)?;

        info!(
            %id,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Product fetched"
        );
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpProductSource {
        HttpProductSource::new(Url::parse(base).unwrap(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_product_url_from_bare_host() {
        let url = source("https://dummyjson.com").product_url(ProductId(1)).unwrap();
        assert_eq!(url.as_str(), "https://dummyjson.com/products/1");
    }

    #[test]
    fn test_product_url_keeps_prefix() {
        let url = source("http://localhost:8080/api/")
            .product_url(ProductId(12))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/products/12");

        let url = source("http://localhost:8080/api")
            .product_url(ProductId(12))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/products/12");
    }

    #[test]
    fn test_rejects_non_base_url() {
        let url = Url::parse("mailto:shop@example.com").unwrap();
        let err = HttpProductSource::new(url, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidUrl(_)));
    }
}

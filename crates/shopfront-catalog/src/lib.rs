//! # shopfront-catalog: Remote Product Lookup
//!
//! Fetches product records from the catalog API and hands them to views as
//! a three-state [`FetchState`].
//!
//! ## Module Organization
//! ```text
//! shopfront_catalog/
//! ├── lib.rs      ◄─── You are here (exports)
//! ├── config.rs   ◄─── CatalogConfig (TOML + env + defaults)
//! ├── error.rs    ◄─── CatalogError, ConfigError
//! ├── fetch.rs    ◄─── FetchState: Loading | Failed | Ready
//! ├── query.rs    ◄─── QueryClient (cache, dedup), ProductQuery
//! └── source.rs   ◄─── ProductSource trait, HttpProductSource
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use shopfront_catalog::{CatalogConfig, QueryClient};
//! use shopfront_core::ProductId;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CatalogConfig::load(None)?;
//! let client = Arc::new(QueryClient::from_config(&config)?);
//!
//! let mut query = client.watch(ProductId(1));
//! let state = query.settled().await;
//! if let Some(product) = state.data() {
//!     println!("{} costs {}", product.title, product.price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod query;
pub mod source;

pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult, ConfigError};
pub use fetch::FetchState;
pub use query::{ProductQuery, QueryClient};
pub use source::{HttpProductSource, ProductSource};

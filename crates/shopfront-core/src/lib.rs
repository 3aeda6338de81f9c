//! # shopfront-core: Pure Business Logic for the Product Page
//!
//! Everything the product page computes lives here as pure functions over
//! plain data. No network, no terminal, no clock reads outside of
//! timestamping cart lines.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Product Page (apps/product-page)                │   │
//! │  │   Navigation ─ Image ─ Info ─ Meta ─ Actions ──► CartProvider   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ shopfront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │ ProductId │  │           │  │ LineItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │              shopfront-catalog (remote product lookup)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductId)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart state container and its derived totals
//! - [`error`] - Domain error types
//! - [`validation`] - Product record validation
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::cart::Cart;
//! use shopfront_core::money::Money;
//! use shopfront_core::types::Product;
//!
//! let product = Product::builder(1, "Test Product")
//!     .price(Money::from_cents(9999))
//!     .build();
//!
//! let mut cart = Cart::new();
//! cart.add_item(&product);
//! cart.add_item(&product);
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price().to_string(), "$199.98");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{Product, ProductBuilder, ProductId};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Highest rating a product record may carry.
pub const MAX_RATING: f64 = 5.0;

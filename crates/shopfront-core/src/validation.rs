//! # Validation Module
//!
//! Checks applied to product records before they reach the page.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Required fields present (id, title, price)                        │
//! │  └── Price is a finite number                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Title not blank                                                   │
//! │  ├── Price not negative                                                │
//! │  ├── Rating within 0..=5                                               │
//! │  └── Stock not negative                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  FetchState::Ready(product)  or  FetchState::Failed(InvalidProduct)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::MAX_RATING;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product title.
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_title;
///
/// assert!(validate_title("Essence Mascara").is_ok());
/// assert!(validate_title("   ").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }
    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a review rating.
pub fn validate_rating(rating: f64) -> ValidationResult<()> {
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0.0,
            max: MAX_RATING,
        });
    }
    Ok(())
}

/// Validates a stock count.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

/// Runs every field check on a fetched product.
pub fn validate_product(product: &Product) -> CoreResult<()> {
    validate_title(&product.title)
        .and_then(|_| validate_price(product.price))
        .and_then(|_| validate_rating(product.rating))
        .and_then(|_| validate_stock(product.stock))
        .map_err(|source| CoreError::InvalidProduct {
            id: product.id,
            source,
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

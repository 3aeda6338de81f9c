//! # Domain Types
//!
//! The product record shown on the page and its identifier.
//!
//! ## Wire Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /products/1                                                        │
//! │                                                                         │
//! │  {                                    Product                           │
//! │    "id": 1,                  ───────► id: ProductId(1)                  │
//! │    "title": "...",           ───────► title                             │
//! │    "price": 99.99,           ───────► price: Money(9999)   ◄── cents!   │
//! │    "rating": 4.5,            ───────► rating                            │
//! │    "stock": 10,              ───────► stock                             │
//! │    "availabilityStatus": ..  ───────► availability_status               │
//! │    "returnPolicy": ..        ───────► return_policy                     │
//! │    "images": [..],           ───────► images                            │
//! │    "reviews": [..]           ───────► (ignored)                         │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Unique identifier of a product in the remote catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ProductId)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as returned by the remote catalog.
///
/// Immutable once fetched. Cart lines keep their own clone, so later
/// refetches never change what is already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Long description shown in the info section.
    #[serde(default)]
    pub description: String,

    /// Category slug (e.g., "electronics").
    #[serde(default)]
    pub category: String,

    /// Unit price in cents. Decimal on the wire.
    #[serde(with = "decimal_price")]
    pub price: Money,

    /// Average review rating, 0.0 to 5.0.
    #[serde(default)]
    pub rating: f64,

    /// Units in stock.
    #[serde(default)]
    pub stock: i64,

    /// Brand name. Some catalog entries have none.
    #[serde(default)]
    pub brand: String,

    /// Free-form availability label ("In Stock", "Low Stock", ...).
    #[serde(default)]
    pub availability_status: String,

    /// Free-form return policy ("30 days return policy", ...).
    #[serde(default)]
    pub return_policy: String,

    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: String,

    /// Gallery image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Starts building a product with the two fields every record needs.
    pub fn builder(id: u64, title: impl Into<String>) -> ProductBuilder {
        ProductBuilder::new(id, title)
    }

    /// Whether any units are in stock.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// The image the page shows first: the thumbnail, else the first
    /// gallery image.
    pub fn primary_image(&self) -> Option<&str> {
        if !self.thumbnail.is_empty() {
            return Some(&self.thumbnail);
        }
        self.images.first().map(String::as_str)
    }
}

// =============================================================================
// Product Builder
// =============================================================================

/// Builder for [`Product`], mostly used by tests and fixtures.
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    fn new(id: u64, title: impl Into<String>) -> Self {
        ProductBuilder {
            product: Product {
                id: ProductId(id),
                title: title.into(),
                description: String::new(),
                category: String::new(),
                price: Money::zero(),
                rating: 0.0,
                stock: 0,
                brand: String::new(),
                availability_status: String::new(),
                return_policy: String::new(),
                thumbnail: String::new(),
                images: Vec::new(),
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.product.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.product.category = category.into();
        self
    }

    pub fn price(mut self, price: Money) -> Self {
        self.product.price = price;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.product.rating = rating;
        self
    }

    pub fn stock(mut self, stock: i64) -> Self {
        self.product.stock = stock;
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.product.brand = brand.into();
        self
    }

    pub fn availability_status(mut self, status: impl Into<String>) -> Self {
        self.product.availability_status = status.into();
        self
    }

    pub fn return_policy(mut self, policy: impl Into<String>) -> Self {
        self.product.return_policy = policy.into();
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.product.thumbnail = url.into();
        self
    }

    pub fn images<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product.images = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}

// =============================================================================
// Price Wire Format
// =============================================================================

/// Serde adapter: decimal major units on the wire, [`Money`] in memory.
mod decimal_price {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::money::Money;

    pub fn serialize<S: Serializer>(price: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(price.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount)
            .ok_or_else(|| D::Error::custom(format!("price {} is not a finite amount", amount)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 1,
        "title": "Test Product",
        "description": "Test Description",
        "category": "electronics",
        "price": 99.99,
        "rating": 4.5,
        "stock": 10,
        "brand": "Test Brand",
        "availabilityStatus": "In Stock",
        "returnPolicy": "30 days",
        "thumbnail": "https://example.com/thumb.jpg",
        "images": ["https://example.com/image1.jpg"],
        "reviews": [{"rating": 5}]
    }"#;

    #[test]
    fn test_deserialize_catalog_record() {
        let product: Product = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(product.id, ProductId(1));
        assert_eq!(product.price, Money::from_cents(9999));
        assert_eq!(product.availability_status, "In Stock");
        assert_eq!(product.return_policy, "30 days");
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn test_missing_brand_defaults_to_empty() {
        let product: Product =
            serde_json::from_str(r#"{"id": 7, "title": "Apple", "price": 1.49}"#).unwrap();
        assert!(product.brand.is_empty());
        assert_eq!(product.price.cents(), 149);
    }

    #[test]
    fn test_price_written_back_as_decimal() {
        let product = Product::builder(3, "Lamp")
            .price(Money::from_cents(1250))
            .build();
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], serde_json::json!(12.5));
        assert_eq!(json["availabilityStatus"], serde_json::json!(""));
    }

    #[test]
    fn test_primary_image_falls_back_to_gallery() {
        let product = Product::builder(1, "Mug")
            .images(["https://example.com/a.jpg", "https://example.com/b.jpg"])
            .build();
        assert_eq!(product.primary_image(), Some("https://example.com/a.jpg"));

        let bare = Product::builder(2, "Bare").build();
        assert_eq!(bare.primary_image(), None);
    }

    #[test]
    fn test_product_id_parse() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId(42));
        assert!("abc".parse::<ProductId>().is_err());
    }
}

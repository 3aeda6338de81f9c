//! Product page components.
//!
//! Each component reads a [`FetchState<Product>`] and builds a
//! [`Node`](crate::view::Node). None of them fail on a missing product:
//! loading and error states render placeholders.
//!
//! ```text
//! ProductDetail                     .productDetail
//! ├── ProductNavigation             #product-navigation
//! └── .content
//!     ├── ProductImage              #product-image
//!     └── .infoSection
//!         ├── ProductInfo           #product-info
//!         ├── ProductMeta           #product-meta
//!         └── ProductActions        #product-actions
//! ```
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use shopfront_catalog::FetchState;
//! use shopfront_page::components::{Component, ProductActions};
//! use shopfront_page::state::{CartActions, CartState};
//!
//! let cart = Arc::new(CartState::new());
//! let state = FetchState::Loading;
//! let view = ProductActions::new(&state, cart.clone()).view();
//!
//! view.find_button("add to cart").unwrap().click();
//! assert_eq!(cart.total_items(), 0);
//! ```
//!
//! [`FetchState<Product>`]: shopfront_catalog::FetchState

mod product_actions;
mod product_detail;
mod product_image;
mod product_info;
mod product_meta;
mod product_navigation;

pub use product_actions::{ProductActions, ADD_TO_CART_LABEL};
pub use product_detail::ProductDetail;
pub use product_image::ProductImage;
pub use product_info::ProductInfo;
pub use product_meta::ProductMeta;
pub use product_navigation::ProductNavigation;

use crate::view::Node;

/// Anything that renders into the view tree.
pub trait Component {
    fn view(&self) -> Node;
}

/// Test ids carried by the page sections.
pub mod test_ids {
    pub const NAVIGATION: &str = "product-navigation";
    pub const IMAGE: &str = "product-image";
    pub const INFO: &str = "product-info";
    pub const META: &str = "product-meta";
    pub const ACTIONS: &str = "product-actions";
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use shopfront_catalog::{CatalogError, FetchState};
    use shopfront_core::{CartLineItem, Money, Product, ProductId};

    use crate::state::CartActions;

    /// The product every component test renders.
    pub fn sample_product() -> Product {
        Product::builder(1, "Test Product")
            .description("Test Description")
            .category("electronics")
            .price(Money::from_cents(9999))
            .rating(4.5)
            .stock(10)
            .brand("Test Brand")
            .availability_status("In Stock")
            .return_policy("30 days")
            .thumbnail("https://example.com/thumb.jpg")
            .images(["https://example.com/image1.jpg"])
            .build()
    }

    pub fn ready() -> FetchState<Product> {
        FetchState::Ready(sample_product())
    }

    pub fn failed() -> FetchState<Product> {
        FetchState::Failed(CatalogError::NotFound(ProductId(1)))
    }

    /// Cart double that records `add_to_cart` calls and ignores the rest.
    #[derive(Default)]
    pub struct RecordingCart {
        added: Mutex<Vec<Product>>,
    }

    impl RecordingCart {
        pub fn added(&self) -> Vec<Product> {
            self.added.lock().unwrap().clone()
        }
    }

    impl CartActions for RecordingCart {
        fn items(&self) -> Vec<CartLineItem> {
            Vec::new()
        }

        fn add_to_cart(&self, product: &Product) {
            self.added.lock().unwrap().push(product.clone());
        }

        fn remove_from_cart(&self, _product_id: ProductId) {}

        fn update_quantity(&self, _product_id: ProductId, _quantity: i64) {}

        fn clear_cart(&self) {}

        fn total_items(&self) -> u64 {
            0
        }

        fn total_price(&self) -> Money {
            Money::zero()
        }
    }
}

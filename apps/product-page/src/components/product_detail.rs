//! Full product page.

use std::sync::Arc;

use shopfront_catalog::FetchState;
use shopfront_core::Product;

use super::{
    Component, ProductActions, ProductImage, ProductInfo, ProductMeta, ProductNavigation,
};
use crate::error::PageResult;
use crate::state::{use_cart_context, CartActions};
use crate::view::Node;

/// Composes navigation, image, info, meta and actions for one product.
pub struct ProductDetail<'a> {
    state: &'a FetchState<Product>,
    cart: Arc<dyn CartActions>,
    currency_symbol: String,
    selected_image: Option<usize>,
}

impl<'a> ProductDetail<'a> {
    pub fn new(state: &'a FetchState<Product>, cart: Arc<dyn CartActions>) -> Self {
        ProductDetail {
            state,
            cart,
            currency_symbol: "$".to_string(),
            selected_image: None,
        }
    }

    /// Uses the cart of the innermost mounted `CartProvider`.
    pub fn from_context(state: &'a FetchState<Product>) -> PageResult<Self> {
        Ok(Self::new(state, use_cart_context()?))
    }

    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn selected_image(mut self, index: usize) -> Self {
        self.selected_image = Some(index);
        self
    }
}

impl Component for ProductDetail<'_> {
    fn view(&self) -> Node {
        let mut image = ProductImage::new(self.state);
        if let Some(index) = self.selected_image {
            image = image.select(index);
        }

        let info_section = Node::section("infoSection").children([
            ProductInfo::new(self.state)
                .currency_symbol(self.currency_symbol.clone())
                .view(),
            ProductMeta::new(self.state).view(),
            ProductActions::new(self.state, Arc::clone(&self.cart)).view(),
        ]);

        Node::section("productDetail")
            .child(ProductNavigation::new(self.state).view())
            .child(
                Node::section("content")
                    .child(image.view())
                    .child(info_section),
            )
    }
}

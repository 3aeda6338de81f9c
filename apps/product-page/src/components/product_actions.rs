//! "Add to Cart" action for the current product.

use std::sync::Arc;

use tracing::debug;

use shopfront_catalog::FetchState;
use shopfront_core::Product;

use super::{test_ids, Component};
use crate::error::PageResult;
use crate::state::{use_cart_context, CartActions};
use crate::view::{Button, Node};

pub const ADD_TO_CART_LABEL: &str = "Add to Cart";

/// Action area under the product info.
///
/// | fetch state | button            | click                    |
/// |-------------|-------------------|--------------------------|
/// | `Ready`     | enabled           | `add_to_cart(product)`   |
/// | `Loading`   | shown, disabled   | nothing                  |
/// | `Failed`    | shown, disabled   | nothing                  |
pub struct ProductActions<'a> {
    state: &'a FetchState<Product>,
    cart: Arc<dyn CartActions>,
}

impl<'a> ProductActions<'a> {
    /// Uses the given cart.
    pub fn new(state: &'a FetchState<Product>, cart: Arc<dyn CartActions>) -> Self {
        ProductActions { state, cart }
    }

    /// Uses the cart of the innermost mounted `CartProvider`.
    pub fn from_context(state: &'a FetchState<Product>) -> PageResult<Self> {
        Ok(Self::new(state, use_cart_context()?))
    }

    /// Adds the current product once; does nothing without product data.
    pub fn add_to_cart(&self) {
        add_current(self.state.data(), self.cart.as_ref());
    }
}

fn add_current(product: Option<&Product>, cart: &dyn CartActions) {
    match product {
        Some(product) => cart.add_to_cart(product),
        None => debug!("Add to cart ignored: no product data"),
    }
}

impl Component for ProductActions<'_> {
    fn view(&self) -> Node {
        let product = self.state.data().cloned();
        let enabled = product.is_some();
        let cart = Arc::clone(&self.cart);

        let button = Button::new(
            ADD_TO_CART_LABEL,
            Arc::new(move || add_current(product.as_ref(), cart.as_ref())),
        )
        .enabled(enabled);

        Node::section("productActions")
            .test_id(test_ids::ACTIONS)
            .child(Node::button(button))
    }
}

//! Title, brand, price, rating and description.

use shopfront_catalog::FetchState;
use shopfront_core::{Product, MAX_RATING};

use super::{test_ids, Component};
use crate::view::Node;

pub struct ProductInfo<'a> {
    state: &'a FetchState<Product>,
    currency_symbol: String,
}

impl<'a> ProductInfo<'a> {
    pub fn new(state: &'a FetchState<Product>) -> Self {
        ProductInfo {
            state,
            currency_symbol: "$".to_string(),
        }
    }

    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }
}

impl Component for ProductInfo<'_> {
    fn view(&self) -> Node {
        let section = Node::section("productInfo").test_id(test_ids::INFO);

        let product = match self.state {
            FetchState::Loading => return section.child(Node::text("Loading product...")),
            FetchState::Failed(err) => {
                return section.child(Node::text(format!("Product unavailable: {}", err)))
            }
            FetchState::Ready(product) => product,
        };

        let mut section = section.child(Node::text(&product.title).class("title"));
        if !product.brand.is_empty() {
            section = section.child(Node::text(format!("by {}", product.brand)).class("brand"));
        }

        section
            .child(Node::text(product.price.format_with(&self.currency_symbol)).class("price"))
            .child(
                Node::text(format!("Rating: {:.1} / {:.0}", product.rating, MAX_RATING))
                    .class("rating"),
            )
            .child(Node::text(&product.description).class("description"))
    }
}

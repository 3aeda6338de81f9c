//! Stock, availability, return policy and category.

use shopfront_catalog::FetchState;
use shopfront_core::Product;

use super::{test_ids, Component};
use crate::view::Node;

pub struct ProductMeta<'a> {
    state: &'a FetchState<Product>,
}

impl<'a> ProductMeta<'a> {
    pub fn new(state: &'a FetchState<Product>) -> Self {
        ProductMeta { state }
    }
}

fn stock_line(product: &Product) -> String {
    if product.in_stock() {
        format!("Stock: {} available", product.stock)
    } else {
        "Stock: out of stock".to_string()
    }
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "n/a"
    } else {
        value
    }
}

impl Component for ProductMeta<'_> {
    fn view(&self) -> Node {
        let section = Node::section("productMeta").test_id(test_ids::META);

        let Some(product) = self.state.data() else {
            return section.child(Node::text("Details unavailable"));
        };

        section.children([
            Node::text(stock_line(product)).class("stock"),
            Node::text(format!(
                "Availability: {}",
                or_unknown(&product.availability_status)
            ))
            .class("availability"),
            Node::text(format!("Returns: {}", or_unknown(&product.return_policy)))
                .class("returnPolicy"),
            Node::text(format!("Category: {}", or_unknown(&product.category))).class("category"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::{ready, sample_product};

    #[test]
    fn test_renders_meta_fields() {
        let state = ready();
        let view = ProductMeta::new(&state).view();

        assert_eq!(
            view.text_content(),
            "Stock: 10 available Availability: In Stock Returns: 30 days Category: electronics"
        );
    }

    #[test]
    fn test_out_of_stock_and_missing_fields() {
        let mut product = sample_product();
        product.stock = 0;
        product.return_policy.clear();
        let state = FetchState::Ready(product);

        let text = ProductMeta::new(&state).view().text_content();
        assert!(text.contains("Stock: out of stock"));
        assert!(text.contains("Returns: n/a"));
    }

    #[test]
    fn test_without_data() {
        let view = ProductMeta::new(&FetchState::Loading).view();
        assert_eq!(view.text_content(), "Details unavailable");
    }
}

//! Back link and breadcrumb.

use shopfront_catalog::FetchState;
use shopfront_core::Product;

use super::{test_ids, Component};
use crate::view::Node;

pub const LISTING_HREF: &str = "/products";

pub struct ProductNavigation<'a> {
    state: &'a FetchState<Product>,
}

impl<'a> ProductNavigation<'a> {
    pub fn new(state: &'a FetchState<Product>) -> Self {
        ProductNavigation { state }
    }

    /// "Products / {category} / {title}", or just "Products" without data.
    pub fn breadcrumb(&self) -> String {
        let mut parts = vec!["Products"];
        if let Some(product) = self.state.data() {
            if !product.category.is_empty() {
                parts.push(&product.category);
            }
            parts.push(&product.title);
        }
        parts.join(" / ")
    }
}

impl Component for ProductNavigation<'_> {
    fn view(&self) -> Node {
        Node::section("productNavigation")
            .test_id(test_ids::NAVIGATION)
            .child(Node::link("← Back to products", LISTING_HREF))
            .child(Node::text(self.breadcrumb()).class("breadcrumb"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::{failed, ready};

    #[test]
    fn test_breadcrumb_with_product() {
        let state = ready();
        assert_eq!(
            ProductNavigation::new(&state).breadcrumb(),
            "Products / electronics / Test Product"
        );
    }

    #[test]
    fn test_breadcrumb_without_product() {
        assert_eq!(ProductNavigation::new(&FetchState::Loading).breadcrumb(), "Products");
        assert_eq!(ProductNavigation::new(&failed()).breadcrumb(), "Products");
    }

    #[test]
    fn test_back_link_always_rendered() {
        let view = ProductNavigation::new(&failed()).view();
        assert!(view.text_content().contains("Back to products"));
    }
}

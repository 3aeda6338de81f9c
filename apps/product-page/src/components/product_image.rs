//! Main product image plus gallery.

use shopfront_catalog::FetchState;
use shopfront_core::Product;

use super::{test_ids, Component};
use crate::view::Node;

pub struct ProductImage<'a> {
    state: &'a FetchState<Product>,
    selected: Option<usize>,
}

impl<'a> ProductImage<'a> {
    pub fn new(state: &'a FetchState<Product>) -> Self {
        ProductImage {
            state,
            selected: None,
        }
    }

    /// Shows gallery image `index` as the main image.
    ///
    /// Out-of-range indexes fall back to the default image.
    pub fn select(mut self, index: usize) -> Self {
        self.selected = Some(index);
        self
    }

    /// URL of the image shown large.
    pub fn main_image(&self) -> Option<&'a str> {
        let product = self.state.data()?;
        self.selected
            .and_then(|index| product.images.get(index))
            .map(String::as_str)
            .or_else(|| product.primary_image())
    }
}

impl Component for ProductImage<'_> {
    fn view(&self) -> Node {
        let section = Node::section("productImage").test_id(test_ids::IMAGE);

        let product = match self.state {
            FetchState::Loading => return section.child(Node::text("Loading image...")),
            FetchState::Failed(_) => return section.child(Node::text("Image unavailable")),
            FetchState::Ready(product) => product,
        };

        let main = match self.main_image() {
            Some(src) => Node::image(src, &product.title).class("mainImage"),
            None => Node::text("No image").class("mainImage"),
        };

        let gallery = product
            .images
            .iter()
            .enumerate()
            .map(|(index, src)| Node::image(src, format!("{} {}", product.title, index + 1)));

        section
            .child(main)
            .child(Node::section("gallery").children(gallery))
    }
}

//! # View Tree
//!
//! A small retained tree that components build and the terminal renders.
//!
//! ```text
//! Node::section("productDetail")
//! ├── Node::section("productNavigation")  #product-navigation
//! │   ├── Link   "← Back to products"
//! │   └── Text   "Products / laptops / Test Product"
//! └── Node::section("infoSection")
//!     ├── ...
//!     └── Node::section("productActions")  #product-actions
//!         └── Button "Add to Cart"  ── click() ──► ClickHandler
//! ```
//!
//! Lookups mirror the way a page is inspected in tests: by test id, by
//! class (substring), and by button name (case-insensitive substring).

use std::fmt;
use std::sync::Arc;

/// Callback fired by [`Button::click`].
pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;

// =============================================================================
// Button
// =============================================================================

/// A clickable button.
///
/// `enabled` only affects presentation; `click()` always runs the handler,
/// and the handler decides whether there is anything to do.
#[derive(Clone)]
pub struct Button {
    label: String,
    enabled: bool,
    on_click: ClickHandler,
}

impl Button {
    pub fn new(label: impl Into<String>, on_click: ClickHandler) -> Self {
        Button {
            label: label.into(),
            enabled: true,
            on_click,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Simulates a user click.
    pub fn click(&self) {
        (self.on_click)();
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Node
// =============================================================================

/// What a node is.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Grouping element; only its children are visible.
    Section,
    Text(String),
    Image { src: String, alt: String },
    Link { label: String, href: String },
    Button(Button),
}

/// One element of the view tree.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    class: Option<String>,
    test_id: Option<String>,
    children: Vec<Node>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            class: None,
            test_id: None,
            children: Vec::new(),
        }
    }

    pub fn section(class: impl Into<String>) -> Self {
        Node::new(NodeKind::Section).class(class)
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::new(NodeKind::Text(content.into()))
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Node::new(NodeKind::Image {
            src: src.into(),
            alt: alt.into(),
        })
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Node::new(NodeKind::Link {
            label: label.into(),
            href: href.into(),
        })
    }

    pub fn button(button: Button) -> Self {
        Node::new(NodeKind::Button(button))
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.children.extend(children);
        self
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn test_id_value(&self) -> Option<&str> {
        self.test_id.as_deref()
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Depth-first, pre-order walk over this node and its descendants.
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// First node (self included) carrying `test_id`.
    pub fn find_by_test_id(&self, test_id: &str) -> Option<&Node> {
        self.walk()
            .into_iter()
            .find(|node| node.test_id.as_deref() == Some(test_id))
    }

    /// First node whose class contains `needle`.
    pub fn find_by_class(&self, needle: &str) -> Option<&Node> {
        self.walk().into_iter().find(|node| {
            node.class
                .as_deref()
                .is_some_and(|class| class.contains(needle))
        })
    }

    /// First button whose label contains `name`, ignoring case.
    pub fn find_button(&self, name: &str) -> Option<&Button> {
        let needle = name.to_lowercase();
        self.walk().into_iter().find_map(|node| match &node.kind {
            NodeKind::Button(button) if button.label.to_lowercase().contains(&needle) => {
                Some(button)
            }
            _ => None,
        })
    }

    /// Whether a descendant (or self) carries `test_id`.
    pub fn contains_test_id(&self, test_id: &str) -> bool {
        self.find_by_test_id(test_id).is_some()
    }

    /// All visible text in document order, joined by single spaces.
    pub fn text_content(&self) -> String {
        self.walk()
            .into_iter()
            .filter_map(|node| match &node.kind {
                NodeKind::Text(text) => Some(text.as_str()),
                NodeKind::Link { label, .. } => Some(label.as_str()),
                NodeKind::Button(button) => Some(button.label.as_str()),
                NodeKind::Image { alt, .. } => Some(alt.as_str()),
                NodeKind::Section => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    // -------------------------------------------------------------------------
    // Terminal Rendering
    // -------------------------------------------------------------------------

    /// Plain-text rendering, one element per line, indented by nesting.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let line = match &self.kind {
            NodeKind::Section => None,
            NodeKind::Text(text) => Some(text.clone()),
            NodeKind::Image { src, alt } => Some(format!("[image] {} <{}>", alt, src)),
            NodeKind::Link { label, href } => Some(format!("{} <{}>", label, href)),
            NodeKind::Button(button) if button.enabled => Some(format!("[ {} ]", button.label)),
            NodeKind::Button(button) => Some(format!("[ {} ] (unavailable)", button.label)),
        };
        if let Some(line) = line {
            out.push_str(&indent);
            out.push_str(&line);
            out.push('\n');
        }

        // Only sections with a test id are visible blocks; plain wrappers
        // do not indent.
        let child_depth = match self.kind {
            NodeKind::Section if self.test_id.is_none() => depth,
            _ => depth + 1,
        };
        for child in &self.children {
            child.render_into(out, child_depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> Node {
        Node::section("pageRoot").children([
            Node::section("header").test_id("header").child(Node::text("Title")),
            Node::section("body infoSection").child(
                Node::section("actions")
                    .test_id("actions")
                    .child(Node::button(Button::new("Add to Cart", Arc::new(|| {})))),
            ),
        ])
    }

    #[test]
    fn test_find_by_test_id() {
        let tree = sample();
        assert!(tree.find_by_test_id("header").is_some());
        assert!(tree.find_by_test_id("missing").is_none());
    }

    #[test]
    fn test_builders_set_class_and_test_id() {
        let tree = sample();
        let header = &tree.child_nodes()[0];

        assert_eq!(tree.class_name(), Some("pageRoot"));
        assert_eq!(tree.test_id_value(), None);
        assert_eq!(header.class_name(), Some("header"));
        assert_eq!(header.test_id_value(), Some("header"));
        assert!(matches!(header.child_nodes()[0].kind(), NodeKind::Text(_)));
    }

    #[test]
    fn test_find_by_class_matches_substring() {
        let tree = sample();
        let info = tree.find_by_class("infoSection").unwrap();
        assert!(info.contains_test_id("actions"));
        assert!(!info.contains_test_id("header"));
    }

    #[test]
    fn test_find_button_ignores_case() {
        let tree = sample();
        assert_eq!(tree.find_button("add to cart").unwrap().label(), "Add to Cart");
        assert!(tree.find_button("checkout").is_none());
    }

    #[test]
    fn test_click_runs_handler_even_when_disabled() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = clicks.clone();
        let button = Button::new("Go", Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .enabled(false);

        button.click();
        button.click();

        assert_eq!(clicks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_walk_is_document_order() {
        let tree = sample();
        assert_eq!(tree.text_content(), "Title Add to Cart");
    }

    #[test]
    fn test_render_text() {
        let tree = Node::section("root").children([
            Node::text("Heading"),
            Node::section("box")
                .test_id("box")
                .children([Node::link("Back", "/products"), Node::image("/a.jpg", "A")]),
            Node::button(Button::new("Buy", Arc::new(|| {})).enabled(false)),
        ]);

        let expected = "Heading\n  Back </products>\n  [image] A </a.jpg>\n[ Buy ] (unavailable)\n";
        assert_eq!(tree.render_text(), expected);
    }
}

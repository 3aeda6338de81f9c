//! # Cart State
//!
//! The shared cart behind the product page, and the provider that makes it
//! reachable from any component.
//!
//! ## Two Ways In
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Getting Hold of the Cart                             │
//! │                                                                         │
//! │  1. Explicit injection                                                 │
//! │     ProductActions::new(state, Arc<dyn CartActions>)                   │
//! │                                                                         │
//! │  2. Ambient lookup through a mounted provider                          │
//! │                                                                         │
//! │     let _provider = CartProvider::mount();    ◄── push onto registry   │
//! │     ...                                                                 │
//! │     use_cart_context()?  ─────────────────────► innermost provider     │
//! │     ...                                                                 │
//! │     drop(_provider)                           ◄── unmount: pop         │
//! │                                                                         │
//! │     use_cart_context() with nothing mounted                            │
//! │       └──► Err(PageError::MissingCartProvider)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! `CartState` wraps the cart in `Arc<Mutex<T>>` so catalog tasks and the
//! UI thread can share it. The provider registry is thread-local: a
//! provider belongs to the UI thread that mounted it.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use shopfront_core::{Cart, CartLineItem, CartTotals, Money, Product, ProductId};

use crate::error::{PageError, PageResult};

// =============================================================================
// Cart Actions
// =============================================================================

/// Everything a component may do with the cart.
///
/// Implemented by [`CartState`] and by test doubles.
pub trait CartActions: Send + Sync {
    /// Line items in insertion order.
    fn items(&self) -> Vec<CartLineItem>;

    /// Adds one unit of `product` (or a new line with quantity 1).
    fn add_to_cart(&self, product: &Product);

    /// Removes the line for `product_id`; no-op if absent.
    fn remove_from_cart(&self, product_id: ProductId);

    /// Sets a line's quantity; `quantity <= 0` removes the line.
    fn update_quantity(&self, product_id: ProductId, quantity: i64);

    /// Empties the cart.
    fn clear_cart(&self);

    /// Sum of quantities.
    fn total_items(&self) -> u64;

    /// Sum of quantity × price.
    fn total_price(&self) -> Money;
}

// =============================================================================
// Cart State
// =============================================================================

/// Shared, lockable cart.
///
/// Cloning is cheap and every clone sees the same cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use shopfront_page::state::CartState;
    /// use shopfront_core::CartTotals;
    ///
    /// let cart_state = CartState::new();
    /// let totals = cart_state.with_cart(|cart| CartTotals::from(cart));
    /// assert_eq!(totals.total_items, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    pub fn totals(&self) -> CartTotals {
        self.with_cart(Cart::totals)
    }
}

impl CartActions for CartState {
    fn items(&self) -> Vec<CartLineItem> {
        self.with_cart(|cart| cart.items().to_vec())
    }

    fn add_to_cart(&self, product: &Product) {
        let quantity = self.with_cart_mut(|cart| {
            cart.add_item(product);
            cart.line(product.id).map(|line| line.quantity)
        });
        debug!(product_id = %product.id, ?quantity, "add_to_cart");
    }

    fn remove_from_cart(&self, product_id: ProductId) {
        debug!(%product_id, "remove_from_cart");
        self.with_cart_mut(|cart| cart.remove_item(product_id));
    }

    fn update_quantity(&self, product_id: ProductId, quantity: i64) {
        debug!(%product_id, quantity, "update_quantity");
        self.with_cart_mut(|cart| cart.update_quantity(product_id, quantity));
    }

    fn clear_cart(&self) {
        debug!("clear_cart");
        self.with_cart_mut(Cart::clear);
    }

    fn total_items(&self) -> u64 {
        self.with_cart(Cart::total_items)
    }

    fn total_price(&self) -> Money {
        self.with_cart(Cart::total_price)
    }
}

/// Cart contents plus totals, as printed by `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
}

impl CartResponse {
    pub fn from_actions(cart: &dyn CartActions) -> Self {
        let items = cart.items();
        let totals = CartTotals {
            line_count: items.len(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        };
        CartResponse { items, totals }
    }
}

// =============================================================================
// Cart Provider
// =============================================================================

thread_local! {
    static PROVIDERS: RefCell<Vec<(u64, Arc<dyn CartActions>)>> = const { RefCell::new(Vec::new()) };
    static NEXT_PROVIDER_ID: Cell<u64> = const { Cell::new(0) };
}

/// A mounted cart provider.
///
/// While the value is alive, [`use_cart_context`] on this thread resolves
/// to its cart (unless a provider mounted later is also alive). Dropping it
/// unmounts the provider and discards its cart.
#[must_use = "the provider unmounts as soon as it is dropped"]
pub struct CartProvider {
    id: u64,
    actions: Arc<dyn CartActions>,
    // Registered in a thread-local; must be dropped on the same thread.
    _not_send: PhantomData<*const ()>,
}

impl CartProvider {
    /// Mounts a provider holding a fresh, empty cart.
    pub fn mount() -> Self {
        Self::mount_with(Arc::new(CartState::new()))
    }

    /// Mounts a provider exposing the given cart implementation.
    pub fn mount_with(actions: Arc<dyn CartActions>) -> Self {
        let id = NEXT_PROVIDER_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        PROVIDERS.with(|providers| providers.borrow_mut().push((id, Arc::clone(&actions))));
        debug!(provider = id, "CartProvider mounted");

        CartProvider {
            id,
            actions,
            _not_send: PhantomData,
        }
    }

    /// The cart this provider exposes.
    pub fn actions(&self) -> Arc<dyn CartActions> {
        Arc::clone(&self.actions)
    }
}

impl Drop for CartProvider {
    fn drop(&mut self) {
        let id = self.id;
        // try_with: the registry may already be gone during thread teardown.
        let _ = PROVIDERS.try_with(|providers| {
            providers.borrow_mut().retain(|(mounted, _)| *mounted != id);
        });
        debug!(provider = id, "CartProvider unmounted");
    }
}

impl std::fmt::Debug for CartProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartProvider").field("id", &self.id).finish()
    }
}

/// The cart of the innermost mounted provider on this thread.
///
/// Fails fast with [`PageError::MissingCartProvider`] when nothing is
/// mounted; there is no default cart.
pub fn use_cart_context() -> PageResult<Arc<dyn CartActions>> {
    PROVIDERS
        .with(|providers| providers.borrow().last().map(|(_, actions)| Arc::clone(actions)))
        .ok_or(PageError::MissingCartProvider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, cents: i64) -> Product {
        Product::builder(id, format!("Product {}", id))
            .price(Money::from_cents(cents))
            .build()
    }

    #[test]
    fn test_cart_state_scenario() {
        let cart = CartState::new();
        let p = product(1, 9999);

        cart.add_to_cart(&p);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price().to_string(), "$99.99");

        cart.add_to_cart(&p);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price().to_string(), "$199.98");
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_clones_share_one_cart() {
        let cart = CartState::new();
        let other = cart.clone();

        other.add_to_cart(&product(1, 100));

        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_operations_through_trait() {
        let cart: Arc<dyn CartActions> = Arc::new(CartState::new());
        cart.add_to_cart(&product(1, 100));
        cart.add_to_cart(&product(2, 250));

        cart.update_quantity(ProductId(2), 3);
        assert_eq!(cart.total_price(), Money::from_cents(850));

        cart.remove_from_cart(ProductId(99));
        assert_eq!(cart.items().len(), 2);

        cart.update_quantity(ProductId(1), 0);
        assert_eq!(cart.items().len(), 1);

        cart.clear_cart();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Money::zero());
    }

    #[test]
    fn test_context_without_provider_fails_fast() {
        let err = use_cart_context().err().unwrap();
        assert!(matches!(err, PageError::MissingCartProvider));
    }

    #[test]
    fn test_context_resolves_mounted_provider() {
        let provider = CartProvider::mount();
        let cart = use_cart_context().unwrap();

        cart.add_to_cart(&product(1, 100));

        assert_eq!(provider.actions().total_items(), 1);
    }

    #[test]
    fn test_nested_providers_innermost_wins() {
        let outer = CartProvider::mount();
        {
            let inner = CartProvider::mount();
            use_cart_context().unwrap().add_to_cart(&product(1, 100));
            assert_eq!(inner.actions().total_items(), 1);
            assert_eq!(outer.actions().total_items(), 0);
        }

        use_cart_context().unwrap().add_to_cart(&product(2, 100));
        assert_eq!(outer.actions().total_items(), 1);

        drop(outer);
        assert!(use_cart_context().is_err());
    }

    #[test]
    fn test_out_of_order_unmount() {
        let first = CartProvider::mount();
        let second = CartProvider::mount();

        drop(first);
        use_cart_context().unwrap().add_to_cart(&product(1, 100));
        assert_eq!(second.actions().total_items(), 1);

        drop(second);
        assert!(use_cart_context().is_err());
    }

    #[test]
    fn test_cart_response_from_actions() {
        let cart = CartState::new();
        cart.add_to_cart(&product(1, 9999));
        cart.add_to_cart(&product(1, 9999));

        let response = CartResponse::from_actions(&cart);
        assert_eq!(response.totals, cart.totals());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totals"]["totalItems"], 2);
        assert_eq!(json["totals"]["totalPrice"], 19998);
        assert_eq!(json["items"][0]["quantity"], 2);
    }
}

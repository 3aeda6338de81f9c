//! # Cart Commands
//!
//! `shopfront add <ID> [--times N]`: click "Add to Cart" on a product page
//! and print the cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle (one command run)                     │
//! │                                                                         │
//! │  ┌──────────┐   mount    ┌──────────┐  click ×N  ┌──────────┐          │
//! │  │ No cart  │──────────►│  Empty   │──────────►│ In Cart  │           │
//! │  │          │ provider   │  Cart    │            │          │           │
//! │  └──────────┘            └──────────┘            └────┬─────┘          │
//! │                                                       │                 │
//! │                                               CartResponse              │
//! │                                               (items + totals)          │
//! │                                                       │                 │
//! │                                               provider dropped          │
//! │                                               (cart discarded)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use shopfront_catalog::FetchState;
use shopfront_core::{Product, ProductId};

use super::product::load_product;
use super::CommandOutput;
use crate::cli::AddArgs;
use crate::components::{Component, ProductDetail, ADD_TO_CART_LABEL};
use crate::error::{PageError, PageResult};
use crate::state::{CartProvider, CartResponse, ConfigState};
use crate::AppContext;

/// Renders the page inside a fresh provider and clicks "Add to Cart"
/// `times` times.
///
/// Clicking without product data is a no-op, so a failed lookup yields an
/// empty cart.
pub fn click_add_to_cart(state: &FetchState<Product>, times: u32) -> PageResult<CartResponse> {
    let provider = CartProvider::mount();
    let view = ProductDetail::from_context(state)?.view();

    let button = view
        .find_button(ADD_TO_CART_LABEL)
        .ok_or_else(|| PageError::internal("product page has no Add to Cart button"))?;

    debug!(times, enabled = button.is_enabled(), "Clicking Add to Cart");
    for _ in 0..times {
        button.click();
    }

    Ok(CartResponse::from_actions(provider.actions().as_ref()))
}

/// Plain-text cart summary.
///
/// ```text
/// 2 × Test Product @ $99.99 = $199.98
/// Items: 2
/// Total: $199.98
/// ```
pub fn render_cart(cart: &CartResponse, config: &ConfigState) -> String {
    if cart.items.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    for line in &cart.items {
        out.push_str(&format!(
            "{} × {} @ {} = {}\n",
            line.quantity,
            line.product.title,
            config.format_price(line.product.price),
            config.format_price(line.line_total()),
        ));
    }
    out.push_str(&format!("Items: {}\n", cart.totals.total_items));
    out.push_str(&format!(
        "Total: {}\n",
        config.format_price(cart.totals.total_price)
    ));
    out
}

/// Fetches the product, adds it `args.times` times and reports the cart.
pub async fn add(ctx: &AppContext, args: &AddArgs) -> PageResult<CommandOutput> {
    let id = ProductId(args.id);
    let state = load_product(ctx, id).await;
    let cart = click_add_to_cart(&state, args.times)?;

    info!(
        %id,
        total_items = cart.totals.total_items,
        total_price = %cart.totals.total_price,
        "Cart updated"
    );

    let text = render_cart(&cart, &ctx.config);
    let json = serde_json::to_value(&cart).map_err(|e| PageError::internal(e.to_string()))?;
    let failure = state.error().cloned().map(PageError::from);

    Ok(CommandOutput {
        text,
        json,
        failure,
    })
}

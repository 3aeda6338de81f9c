//! # Product Commands
//!
//! `shopfront show <ID>`: fetch one product and print its page.

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use shopfront_catalog::FetchState;
use shopfront_core::{Product, ProductId};

use super::CommandOutput;
use crate::cli::ProductArgs;
use crate::components::{Component, ProductDetail};
use crate::error::{PageError, PageResult};
use crate::state::CartProvider;
use crate::AppContext;

/// Waits for the product lookup to settle.
///
/// Concurrent callers for the same id share one request through the
/// context's query client.
pub async fn load_product(ctx: &AppContext, id: ProductId) -> FetchState<Product> {
    debug!(%id, "Loading product");
    let mut query = ctx.client.watch(id);
    query.settled().await
}

/// Renders the product page for `state` inside a fresh cart provider.
pub fn render_page(
    ctx: &AppContext,
    state: &FetchState<Product>,
    image: Option<usize>,
) -> PageResult<String> {
    let _provider = CartProvider::mount();

    let mut detail = ProductDetail::from_context(state)?
        .currency_symbol(ctx.config.catalog.display.currency_symbol.clone());
    if let Some(index) = image {
        detail = detail.selected_image(index);
    }

    Ok(detail.view().render_text())
}

/// `--json` form of a rendered page.
#[derive(Debug, Serialize)]
struct PageJson<'a> {
    product: Option<&'a Product>,
    page: &'a str,
}

/// Fetches the product and renders its page.
///
/// A failed lookup still renders the degraded page; the lookup error is
/// returned in [`CommandOutput::failure`].
pub async fn show(ctx: &AppContext, args: &ProductArgs) -> PageResult<CommandOutput> {
    let id = ProductId(args.id);
    let state = load_product(ctx, id).await;
    let text = render_page(ctx, &state, args.image)?;

    let json = serde_json::to_value(PageJson {
        product: state.data(),
        page: &text,
    })
    .unwrap_or_else(|e| json!({ "page": text.clone(), "serializeError": e.to_string() }));

    let failure = match state {
        FetchState::Failed(err) => Some(PageError::from(err)),
        FetchState::Loading => Some(PageError::internal("product lookup never settled")),
        FetchState::Ready(product) => {
            info!(%id, title = %product.title, "Rendered product page");
            None
        }
    };

    Ok(CommandOutput {
        text,
        json,
        failure,
    })
}

//! # Commands Module
//!
//! What the `shopfront` subcommands do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (CommandOutput)
//! ├── product.rs  ◄─── show: fetch + render the page
//! └── cart.rs     ◄─── add: fetch + click "Add to Cart" + cart summary
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  AppContext { config, client }                                         │
//! │         │                                                               │
//! │         │  client.watch(id).settled().await     (async, no cart yet)   │
//! │         ▼                                                               │
//! │  FetchState<Product>  Loading | Failed | Ready                         │
//! │         │                                                               │
//! │         │  CartProvider::mount()                (sync, UI thread)      │
//! │         │  ProductDetail::from_context(&state)                         │
//! │         ▼                                                               │
//! │  Node tree ──► render_text() / find_button().click()                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CommandOutput { text, json, failure }                                 │
//! │                                                                         │
//! │  A failed lookup still renders (degraded) and is reported afterwards   │
//! │  through `failure`, which decides the exit code.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod product;

use serde_json::Value;

use crate::error::PageError;

/// Result of one command run.
#[derive(Debug)]
pub struct CommandOutput {
    /// Human-readable output for stdout.
    pub text: String,

    /// Machine-readable output for `--json`.
    pub json: Value,

    /// Set when the command produced output but did not succeed.
    pub failure: Option<PageError>,
}

impl CommandOutput {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

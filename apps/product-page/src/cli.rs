//! Command-line arguments for the `shopfront` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "shopfront",
    version,
    about = "Product page with a shopping cart, in the terminal",
    long_about = "Fetches a product from the catalog API, renders its page and \
                  drives the \"Add to Cart\" action against an in-memory cart."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Catalog API root (overrides config file and SHOPFRONT_API_URL).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Path to a shopfront.toml config file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logs (RUST_LOG takes precedence when set).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of the rendered page.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a product and print its page.
    Show(ProductArgs),

    /// Fetch a product, click "Add to Cart" and print the cart.
    Add(AddArgs),
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product identifier.
    #[arg(value_name = "ID")]
    pub id: u64,

    /// Gallery image to show as the main image (0-based).
    #[arg(long = "image", value_name = "INDEX")]
    pub image: Option<usize>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Product identifier.
    #[arg(value_name = "ID")]
    pub id: u64,

    /// How many times to click "Add to Cart".
    #[arg(long, default_value_t = 1, value_name = "N")]
    pub times: u32,
}

//! # Shopfront Product Page
//!
//! A product detail page with an "Add to Cart" action, driven from the
//! terminal.
//!
//! ## Module Organization
//! ```text
//! shopfront_page/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap arguments
//! ├── view.rs         ◄─── Node tree, Button, text renderer
//! ├── components/
//! │   ├── mod.rs      ◄─── Component trait, test ids
//! │   ├── product_detail.rs
//! │   ├── product_navigation.rs
//! │   ├── product_image.rs
//! │   ├── product_info.rs
//! │   ├── product_meta.rs
//! │   └── product_actions.rs
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartActions, CartState, CartProvider
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── CommandOutput
//! │   ├── product.rs  ◄─── show
//! │   └── cart.rs     ◄─── add
//! └── error.rs        ◄─── PageError, ErrorCode
//! ```

pub mod cli;
pub mod commands;
pub mod components;
pub mod error;
pub mod state;
pub mod view;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use shopfront_catalog::QueryClient;

use cli::{Cli, Command};
use commands::CommandOutput;
use error::{PageError, PageResult};
use state::ConfigState;

/// Everything a command needs besides its arguments.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: ConfigState,
    pub client: Arc<QueryClient>,
}

impl AppContext {
    /// Builds the HTTP-backed query client for `config`.
    pub fn new(config: ConfigState) -> PageResult<Self> {
        let client = QueryClient::from_config(&config.catalog)?;
        Ok(AppContext {
            config,
            client: Arc::new(client),
        })
    }
}

/// Runs the `shopfront` binary.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • clap derive, global --api-url / --config / -v / --json            │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • flags > SHOPFRONT_* env > shopfront.toml > defaults               │
/// │                                                                         │
/// │  4. Build AppContext ─────────────────────────────────────────────────► │
/// │     • HttpProductSource + QueryClient                                   │
/// │                                                                         │
/// │  5. Run Command on a tokio runtime ───────────────────────────────────► │
/// │     • print page / cart on stdout                                       │
/// │     • report failures on stderr, exit non-zero                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Starting shopfront");

    let json = cli.json;
    match execute(cli) {
        Ok(output) => {
            print_output(&output, json);
            match output.failure {
                Some(err) => exit_with(&err, json),
                None => ExitCode::SUCCESS,
            }
        }
        Err(err) => exit_with(&err, json),
    }
}

/// Loads configuration and runs the selected command to completion.
pub fn execute(cli: Cli) -> PageResult<CommandOutput> {
    let config = ConfigState::load(cli.config.as_deref(), cli.api_url.as_deref())?;
    let ctx = AppContext::new(config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| PageError::internal(format!("failed to start runtime: {}", e)))?;

    runtime.block_on(run_command(&ctx, &cli.command))
}

/// Dispatches one command against an existing context.
pub async fn run_command(ctx: &AppContext, command: &Command) -> PageResult<CommandOutput> {
    match command {
        Command::Show(args) => commands::product::show(ctx, args).await,
        Command::Add(args) => commands::cart::add(ctx, args).await,
    }
}

fn print_output(output: &CommandOutput, json: bool) {
    if json {
        println!("{}", output.json);
    } else {
        print!("{}", output.text);
    }
}

fn exit_with(err: &PageError, json: bool) -> ExitCode {
    let report = err.report();
    debug!(code = ?report.code, exit_code = err.exit_code(), "Command failed");
    if json {
        eprintln!("{}", serde_json::to_string(&report).unwrap_or_else(|_| report.to_string()));
    } else {
        eprintln!("error: {}", report);
    }
    ExitCode::from(err.exit_code())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages from everything
/// - `-v` - Show debug messages from shopfront crates
/// - Default: warnings, plus info from shopfront crates
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,shopfront=debug"
    } else {
        "warn,shopfront=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries the page; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

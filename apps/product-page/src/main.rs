//! # Shopfront Entry Point
//!
//! ```text
//! shopfront show 1             ─► rendered product page on stdout
//! shopfront add 1 --times 2    ─► cart lines and totals on stdout
//! shopfront --json add 1       ─► CartResponse as JSON
//! ```
//!
//! Exit codes: 0 success, 3 product not found, 4 lookup failed,
//! 70 internal error, 78 bad configuration.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Setup lives in lib.rs
    shopfront_page::run()
}

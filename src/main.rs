//! Ledger Engine CLI
//!
//! Command-line interface for processing ledger commands from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- commands.csv > accounts.csv
//! cargo run -- --mode sequential commands.csv > accounts.csv
//! cargo run -- --mode concurrent --workers 8 commands.csv > accounts.csv
//! ```
//!
//! The program reads account opens and transfers from the input CSV file,
//! runs them through the transfer engine using the selected mode, and
//! writes the final account balances to stdout. Diagnostics go to stderr
//! via `tracing`; set `RUST_LOG` to adjust verbosity.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use ledger_engine::cli;
use ledger_engine::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Stdout carries the account CSV; all diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = cli::parse_args();
    let workers = args.effective_workers();
    let strategy = strategy::create_strategy(args.mode, workers);

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

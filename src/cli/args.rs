use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Process ledger commands (account opens and transfers) from a CSV file
#[derive(Parser, Debug)]
#[command(name = "ledger-engine")]
#[command(about = "Process account opens and fund transfers from a CSV file", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing ledger commands
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing mode
    #[arg(
        long = "mode",
        value_name = "MODE",
        default_value = "concurrent",
        help = "Processing mode: 'sequential' for in-order or 'concurrent' for multi-threaded transfers"
    )]
    pub mode: ModeType,

    /// Number of worker threads (concurrent mode only)
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of transfer worker threads (default: CPU cores)"
    )]
    pub workers: Option<usize>,
}

/// Available processing modes for the command stream
#[derive(Clone, Debug, ValueEnum)]
pub enum ModeType {
    Sequential,
    Concurrent,
}

impl CliArgs {
    /// Effective worker count for concurrent mode
    ///
    /// Falls back to the number of CPU cores when unset or zero.
    pub fn effective_workers(&self) -> usize {
        match self.workers {
            Some(workers) if workers > 0 => workers,
            _ => num_cpus::get(),
        }
    }
}

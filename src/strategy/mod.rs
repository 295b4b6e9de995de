//! Processing strategy module for the CSV command stream
//!
//! This module defines the Strategy pattern for complete command processing
//! pipelines, encompassing CSV parsing, transfer engine processing, and
//! account output. It allows the in-order and multi-threaded implementations
//! to be selected at runtime.

use crate::cli::ModeType;
use std::io::Write;
use std::path::Path;

pub mod concurrent;
pub mod sequential;

pub use concurrent::ConcurrentStrategy;
pub use sequential::SequentialStrategy;

/// Processing strategy trait for complete command processing pipelines
///
/// Each strategy reads ledger commands from a CSV file, runs them through a
/// [`TransferEngine`](crate::core::TransferEngine), and writes the final
/// account states to the output writer.
pub trait ProcessingStrategy: Send + Sync {
    /// Process commands from the input file and write account states
    ///
    /// Fatal errors (file not found, output I/O) are returned. Individual
    /// command failures and business rejections are logged and processing
    /// continues with the next command.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy for the given mode
///
/// `workers` is only consulted by the concurrent strategy.
pub fn create_strategy(mode: ModeType, workers: usize) -> Box<dyn ProcessingStrategy> {
    match mode {
        ModeType::Sequential => Box::new(SequentialStrategy),
        ModeType::Concurrent => Box::new(ConcurrentStrategy::new(workers)),
    }
}

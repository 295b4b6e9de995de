//! Concurrent processing strategy
//!
//! Applies `open` rows in file order, then fans the transfer rows out across
//! a fixed set of worker threads sharing one engine. The engine's
//! per-account lock ordering makes any interleaving safe: transfers on
//! disjoint account pairs run fully in parallel, and contended pairs
//! serialize on their two locks.
//!
//! Transfers carry no cross-worker ordering guarantee. When a file funds an
//! account through one transfer and spends it through another, the spend may
//! observe the balance before or after the funding; both outcomes are valid
//! under the engine contract, which only promises per-pair serializability.

use crate::core::TransferEngine;
use crate::io::csv_format::write_accounts_csv;
use crate::io::reader::CommandReader;
use crate::strategy::sequential::apply_command;
use crate::strategy::ProcessingStrategy;
use crate::types::Command;
use std::io::Write;
use std::path::Path;
use std::thread;
use tracing::warn;

/// Multi-threaded command processing over a shared engine
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentStrategy {
    workers: usize,
}

impl ConcurrentStrategy {
    /// Create a strategy with the given worker count
    ///
    /// A zero worker count falls back to one worker.
    pub fn new(workers: usize) -> Self {
        ConcurrentStrategy {
            workers: workers.max(1),
        }
    }
}

impl ProcessingStrategy for ConcurrentStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let engine = TransferEngine::default();
        let reader = CommandReader::new(input_path)?;

        // Seed accounts first so transfers never race their own opens
        let mut transfers = Vec::new();
        for result in reader {
            match result {
                Ok(Command::Transfer(request)) => transfers.push(Command::Transfer(request)),
                Ok(open @ Command::Open { .. }) => apply_command(&engine, open),
                Err(e) => warn!("CSV parsing error: {e}"),
            }
        }

        let chunk_size = transfers.len().div_ceil(self.workers).max(1);
        thread::scope(|scope| {
            for chunk in transfers.chunks(chunk_size) {
                let engine = engine.clone();
                scope.spawn(move || {
                    for command in chunk {
                        apply_command(&engine, command.clone());
                    }
                });
            }
        });

        write_accounts_csv(&engine.accounts(), output)
    }
}

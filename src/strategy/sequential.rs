//! Sequential processing strategy
//!
//! Streams commands through the transfer engine one at a time, in file
//! order. Memory usage is constant in the input size; only the account
//! table grows.
//!
//! This is the reference behavior: the concurrent strategy must agree with
//! it on every input whose transfers touch disjoint account pairs.

use crate::core::TransferEngine;
use crate::io::csv_format::write_accounts_csv;
use crate::io::reader::CommandReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{Account, Command, TransferStatus};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Single-threaded, in-order command processing
#[derive(Debug, Clone, Copy)]
pub struct SequentialStrategy;

impl ProcessingStrategy for SequentialStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let engine = TransferEngine::default();
        let reader = CommandReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(command) => apply_command(&engine, command),
                Err(e) => warn!("CSV parsing error: {e}"),
            }
        }

        write_accounts_csv(&engine.accounts(), output)
    }
}

/// Apply one command, logging failures and rejections at this boundary
///
/// The engine itself never logs business rejections; strategies decide how
/// loudly to report them.
pub(crate) fn apply_command(engine: &TransferEngine, command: Command) {
    match command {
        Command::Open { id, balance } => {
            if let Err(e) = engine.create_account(Account::new(id, balance)) {
                warn!("Account creation failed: {e}");
            }
        }
        Command::Transfer(request) => {
            match engine.transfer(&request.from, &request.to, request.amount) {
                Ok(outcome) => {
                    if let TransferStatus::Rejected(reason) = outcome.status {
                        info!(
                            from = %request.from,
                            to = %request.to,
                            amount = %request.amount,
                            ?reason,
                            "transfer rejected"
                        );
                    }
                }
                Err(e) => warn!("Transfer failed: {e}"),
            }
        }
    }
}

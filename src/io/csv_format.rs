//! CSV format handling for ledger commands and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain commands
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Account, Command, TransferRequest};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input format with columns: op, account, to, amount.
/// The `to` field is only meaningful for transfer rows; open rows leave it
/// empty.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub account: String,
    pub to: Option<String>,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to a domain Command
///
/// - `open` rows require an amount (the opening balance) and no destination
/// - `transfer` rows require both a destination and an amount
///
/// Identifier and amount validity beyond presence (positivity, distinctness)
/// is the engine's job; this function only parses.
pub fn convert_csv_record(record: CsvRecord) -> Result<Command, String> {
    let amount = match record.amount {
        Some(raw) if !raw.trim().is_empty() => match Decimal::from_str(raw.trim()) {
            Ok(decimal) => Some(decimal),
            Err(_) => {
                return Err(format!(
                    "Invalid amount '{}' for account '{}'",
                    raw, record.account
                ))
            }
        },
        _ => None,
    };

    match record.op.to_lowercase().as_str() {
        "open" => {
            if matches!(&record.to, Some(to) if !to.trim().is_empty()) {
                return Err(format!(
                    "open row for account '{}' does not take a destination",
                    record.account
                ));
            }
            let balance = amount.ok_or_else(|| {
                format!("open row for account '{}' requires a balance", record.account)
            })?;
            Ok(Command::Open {
                id: record.account,
                balance,
            })
        }
        "transfer" => {
            let to = match record.to {
                Some(to) if !to.trim().is_empty() => to.trim().to_string(),
                _ => {
                    return Err(format!(
                        "transfer row from account '{}' requires a destination",
                        record.account
                    ))
                }
            };
            let amount = amount.ok_or_else(|| {
                format!(
                    "transfer row from account '{}' requires an amount",
                    record.account
                )
            })?;
            Ok(Command::Transfer(TransferRequest::new(
                record.account,
                to,
                amount,
            )))
        }
        other => Err(format!(
            "Invalid operation '{}' for account '{}'",
            other, record.account
        )),
    }
}

/// Write account states to CSV format
///
/// Writes accounts with columns: account, balance. Callers are expected to
/// pass an already-sorted slice (the store sorts by identifier) so output is
/// deterministic.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    for account in accounts {
        writer
            .serialize(account)
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

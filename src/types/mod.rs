//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account record and identifier
//! - `transfer`: Transfer request, outcome, and command types
//! - `error`: Error types for the ledger engine

pub mod account;
pub mod error;
pub mod transfer;

pub use account::{Account, AccountId};
pub use error::LedgerError;
pub use transfer::{Command, RejectReason, TransferOutcome, TransferRequest, TransferStatus};

//! Ledger Engine Library
//! # Overview
//!
//! This library provides an in-memory ledger: account creation, balance
//! queries, and concurrent fund transfers with notification side effects.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, TransferOutcome, LedgerError)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::store`] - Keyed in-memory account table
//!   - [`core::locks`] - Per-account lock table with deterministic pair ordering
//!   - [`core::engine`] - The transfer protocol
//!   - [`core::notify`] - Notification sink seam
//! - [`io`] - CSV command input and account output
//! - [`strategy`] - Sequential and concurrent processing pipelines
//!
//! # The Transfer Protocol
//!
//! A transfer locks its two accounts in a global order derived from
//! byte-wise identifier comparison, so opposite-direction transfers on the
//! same pair cannot deadlock. While holding both locks the engine checks
//! that the source balance strictly exceeds the amount, then applies the
//! debit and credit as an all-or-nothing pair. An insufficient balance is a
//! business rejection, not an error: callers receive the unchanged account
//! pair. Notifications to both parties are dispatched after the locks are
//! released and never affect the transfer's result.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{AccountStore, LockTable, LoggingSink, NotificationSink, TransferEngine};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountId, Command, LedgerError, RejectReason, TransferOutcome, TransferRequest,
    TransferStatus,
};

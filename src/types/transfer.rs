//! Transfer-related types for the ledger engine
//!
//! This module defines the transfer request, the explicit outcome type
//! returned by the transfer engine, and the command records read from the
//! CSV front end.

use super::account::{Account, AccountId};
use rust_decimal::Decimal;

/// A request to move funds between two accounts
///
/// Ephemeral, never persisted. Validation (non-empty distinct identifiers,
/// positive amount) happens in the transfer engine before any lock is taken.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    /// Account to debit
    pub from: AccountId,

    /// Account to credit
    pub to: AccountId,

    /// Amount to move; must be strictly positive
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(from: impl Into<AccountId>, to: impl Into<AccountId>, amount: Decimal) -> Self {
        TransferRequest {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// Why a transfer was rejected without mutating any state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The source balance did not strictly exceed the requested amount
    ///
    /// A transfer of the exact full balance is rejected: the debit requires
    /// `balance > amount`, not `>=`.
    InsufficientFunds,
}

/// Terminal state of a transfer attempt
///
/// A rejected transfer is a normal business outcome, not a fault: the caller
/// still receives the (unchanged) account pair. Hard faults such as unknown
/// accounts or invalid requests surface as [`LedgerError`](super::LedgerError)
/// instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStatus {
    /// Both legs were applied and notifications were dispatched
    Completed,

    /// The balance check failed; neither account was touched
    Rejected(RejectReason),
}

impl TransferStatus {
    /// True if both legs of the transfer were applied
    pub fn is_completed(&self) -> bool {
        matches!(self, TransferStatus::Completed)
    }
}

/// Result of a transfer attempt: status plus post-attempt snapshots
///
/// The snapshots are re-read from the store after the locks are released,
/// so they reflect the mutated balances on completion and the untouched
/// balances on rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOutcome {
    /// Whether the transfer was applied or rejected
    pub status: TransferStatus,

    /// Snapshot of the debited account after the attempt
    pub from: Account,

    /// Snapshot of the credited account after the attempt
    pub to: Account,
}

/// A single command from the CSV front end
///
/// `Open` seeds an account with an opening balance; `Transfer` moves funds
/// between two existing accounts.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an account with an opening balance
    Open {
        id: AccountId,
        balance: Decimal,
    },

    /// Move funds between two accounts
    Transfer(TransferRequest),
}

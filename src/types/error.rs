//! Error types for the ledger engine
//!
//! This module defines the structural errors that abort an operation before
//! (or instead of) touching any account state.
//!
//! # Error Taxonomy
//!
//! - **Store errors**: unknown or duplicate account identifiers
//! - **Request errors**: malformed transfer parameters, rejected before any
//!   lock is taken
//! - **Arithmetic errors**: overflow in balance calculations; nothing is
//!   mutated when these occur
//!
//! An insufficient balance is deliberately *not* represented here: it is a
//! recoverable business outcome carried by
//! [`TransferStatus::Rejected`](super::TransferStatus), and notification
//! failures are a separate, always-swallowed type
//! ([`NotificationError`](crate::core::notify::NotificationError)).

use thiserror::Error;

/// Main error type for the ledger engine
///
/// Each variant carries the context needed to diagnose the failure at the
/// boundary where it is logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No account exists for the given identifier
    #[error("Account '{id}' not found")]
    AccountNotFound {
        /// The identifier that failed to resolve
        id: String,
    },

    /// An account with this identifier already exists
    #[error("Account '{id}' already exists")]
    DuplicateAccount {
        /// The identifier that collided
        id: String,
    },

    /// The transfer parameters are malformed
    ///
    /// Raised before any lock is taken: empty identifiers, identical source
    /// and destination, or a non-positive amount.
    #[error("Invalid transfer request: {reason}")]
    InvalidRequest {
        /// Human-readable description of the violation
        reason: String,
    },

    /// A balance calculation would overflow
    ///
    /// The transfer is aborted with no mutation on either account.
    #[error("Arithmetic overflow in {operation} for account '{id}'")]
    ArithmeticOverflow {
        /// Operation that would overflow ("debit" or "credit")
        operation: String,
        /// Account whose balance was being computed
        id: String,
    },
}

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(id: &str) -> Self {
        LedgerError::AccountNotFound { id: id.to_string() }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(id: &str) -> Self {
        LedgerError::DuplicateAccount { id: id.to_string() }
    }

    /// Create an InvalidRequest error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        LedgerError::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, id: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            id: id.to_string(),
        }
    }
}

//! Notification sink: the external collaborator told about transfers
//!
//! The sink is a trait seam so the engine can be wired to a real delivery
//! channel in production and to recording or failing doubles in tests.
//!
//! # Contract
//!
//! - Best-effort: a failing sink never rolls back or fails the transfer.
//!   The engine logs the failure and moves on.
//! - Never invoked while account locks are held.
//! - Should be idempotent; the engine dispatches exactly once per party per
//!   completed transfer, but delivery layers may retry.

use crate::types::Account;
use thiserror::Error;

/// A notification could not be delivered
///
/// Always swallowed by the transfer engine; surfaced only through logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Notification to account '{account_id}' failed: {message}")]
pub struct NotificationError {
    /// Account the notification was addressed to
    pub account_id: String,

    /// Description of the delivery failure
    pub message: String,
}

impl NotificationError {
    pub fn new(account_id: &str, message: impl Into<String>) -> Self {
        NotificationError {
            account_id: account_id.to_string(),
            message: message.into(),
        }
    }
}

/// Collaborator informed once per party after a completed transfer
pub trait NotificationSink: Send + Sync {
    /// Deliver a human-readable message to the account's owner
    fn notify(&self, account: &Account, message: &str) -> Result<(), NotificationError>;
}

/// Sink that emits notifications to the log
///
/// Stands in for an external delivery channel in the CLI and in demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink;

impl NotificationSink for LoggingSink {
    fn notify(&self, account: &Account, message: &str) -> Result<(), NotificationError> {
        tracing::info!(account = %account.id, "{message}");
        Ok(())
    }
}

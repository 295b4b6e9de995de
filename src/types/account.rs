//! Account-related types for the ledger engine
//!
//! This module defines the Account structure, the fundamental record
//! managed by the account store and mutated by the transfer engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account identifier
///
/// Free-form, non-empty, unique within the ledger. Identifiers are also the
/// keys of the per-account lock table, so their byte-wise ordering defines
/// the global lock acquisition order.
pub type AccountId = String;

/// A single ledger entry: identifier plus current balance
///
/// Accounts are owned exclusively by the [`AccountStore`](crate::core::AccountStore);
/// everything handed out by the store is a snapshot clone. The balance is
/// kept non-negative by the transfer engine's sufficiency check: no debit is
/// applied unless the source balance strictly exceeds the amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier, immutable after creation
    #[serde(rename = "account")]
    pub id: AccountId,

    /// Current balance with decimal precision
    ///
    /// Mutated only through the transfer engine's debit/credit pair.
    pub balance: Decimal,
}

impl Account {
    /// Create an account with the given identifier and opening balance
    pub fn new(id: impl Into<AccountId>, balance: Decimal) -> Self {
        Account {
            id: id.into(),
            balance,
        }
    }
}

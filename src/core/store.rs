//! In-memory account store
//!
//! This module provides the `AccountStore` struct, a pure keyed table of
//! accounts. No transfer logic lives here: the store only creates, resolves,
//! and replaces account records.
//!
//! # Design
//!
//! Accounts are held in a `DashMap` (a concurrent HashMap) so that unrelated
//! accounts can be created and read from multiple threads without a global
//! lock. The store hands out snapshot clones, never references into the map;
//! consistency across a two-account mutation is the transfer engine's job,
//! enforced through the separate [`LockTable`](super::LockTable).
//!
//! The store could be backed by any persistent keyed table without changing
//! the transfer engine's contract.

use crate::types::{Account, AccountId, LedgerError};
use dashmap::DashMap;

/// Keyed table of all accounts in the ledger
///
/// Constructed once at service start; accounts are never deleted.
///
/// # Thread Safety
///
/// All methods take `&self` and are safe to call concurrently. Operations on
/// different accounts never block each other. Returned accounts are snapshots
/// taken at call time.
#[derive(Debug, Default)]
pub struct AccountStore {
    /// Account records keyed by identifier
    accounts: DashMap<AccountId, Account>,
}

impl AccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        AccountStore {
            accounts: DashMap::new(),
        }
    }

    /// Insert a new account
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateAccount`] if an account with the same
    /// identifier already exists; the existing record is left untouched.
    pub fn create(&self, account: Account) -> Result<(), LedgerError> {
        // entry() makes the exists-check and insert a single atomic step
        let mut inserted = false;
        self.accounts.entry(account.id.clone()).or_insert_with(|| {
            inserted = true;
            account.clone()
        });

        if inserted {
            Ok(())
        } else {
            Err(LedgerError::duplicate_account(&account.id))
        }
    }

    /// Resolve an account by identifier
    ///
    /// Returns a snapshot clone of the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] if no account exists for the
    /// identifier.
    pub fn get(&self, id: &str) -> Result<Account, LedgerError> {
        self.accounts
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Replace the stored balance for an existing account
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] if no account exists for the
    /// identifier; the store never creates accounts implicitly.
    pub fn update(&self, account: Account) -> Result<(), LedgerError> {
        match self.accounts.get_mut(&account.id) {
            Some(mut entry) => {
                *entry.value_mut() = account;
                Ok(())
            }
            None => Err(LedgerError::account_not_found(&account.id)),
        }
    }

    /// Whether an account exists for the identifier
    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    /// All accounts sorted by identifier
    ///
    /// Sorting makes CSV output deterministic regardless of map iteration
    /// order.
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        accounts
    }

    /// Number of accounts in the store
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// True if no accounts have been created
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

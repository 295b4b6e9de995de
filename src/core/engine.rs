//! Transfer engine: the concurrent transfer protocol
//!
//! This module provides the `TransferEngine`, which orchestrates a transfer
//! end to end: request validation, ordered two-lock acquisition, the
//! balance-sufficiency check, the atomic debit/credit pair, and the
//! post-transfer notification dispatch.
//!
//! # Protocol
//!
//! Per attempt: `Requested -> Locked -> {Applied | Rejected} -> Unlocked ->
//! NotificationsSent -> Completed`. There are no retries; a rejected
//! transfer is terminal for that call.
//!
//! # Concurrency
//!
//! The engine is `Clone` and safe to share across threads. Only the two
//! accounts involved in a transfer are locked, in the global identifier
//! order provided by the [`LockTable`], so opposite-direction transfers on
//! the same pair cannot deadlock and transfers on disjoint pairs run fully
//! in parallel. Notifications are dispatched after both locks are released
//! to keep the external collaborator out of the critical section.

use std::sync::Arc;

use crate::core::locks::{lock, LockTable};
use crate::core::notify::{LoggingSink, NotificationSink};
use crate::core::store::AccountStore;
use crate::types::{
    Account, LedgerError, RejectReason, TransferOutcome, TransferStatus,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Message templates for the two parties of a completed transfer
const DEBIT_NOTICE: &str = "has been debited from your account as a payment to account";
const CREDIT_NOTICE: &str = "UPDATE: Your account has been credited with";

/// Orchestrates transfers over the account store
///
/// Owns the store, the per-account lock table, and the notification sink
/// behind `Arc`s, so clones share state and the engine can be handed to any
/// number of worker threads.
#[derive(Clone)]
pub struct TransferEngine {
    store: Arc<AccountStore>,
    locks: Arc<LockTable>,
    sink: Arc<dyn NotificationSink>,
}

impl TransferEngine {
    /// Create an engine with an empty store and the given sink
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        TransferEngine {
            store: Arc::new(AccountStore::new()),
            locks: Arc::new(LockTable::new()),
            sink,
        }
    }

    /// Create an account
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateAccount`] if the identifier is taken,
    /// or [`LedgerError::InvalidRequest`] if it is empty.
    pub fn create_account(&self, account: Account) -> Result<(), LedgerError> {
        if account.id.is_empty() {
            return Err(LedgerError::invalid_request(
                "account identifier must not be empty",
            ));
        }
        self.store.create(account)
    }

    /// Resolve an account snapshot by identifier
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] if the account does not exist.
    pub fn account(&self, id: &str) -> Result<Account, LedgerError> {
        self.store.get(id)
    }

    /// All accounts sorted by identifier
    pub fn accounts(&self) -> Vec<Account> {
        self.store.accounts()
    }

    /// Move funds from one account to another
    ///
    /// Validates the request, locks the account pair in global identifier
    /// order, checks that the source balance strictly exceeds the amount,
    /// applies the debit and credit while holding both locks, then releases
    /// the locks and notifies both parties.
    ///
    /// An insufficient balance is not an error: the call returns
    /// `Ok(TransferOutcome)` with [`TransferStatus::Rejected`] and the
    /// unchanged account pair. Either both legs apply or neither does; no
    /// partial transfer is observable by a concurrent reader.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidRequest`] for an empty identifier, identical
    ///   source and destination, or a non-positive amount
    /// - [`LedgerError::AccountNotFound`] if either account is missing
    /// - [`LedgerError::ArithmeticOverflow`] if a balance calculation would
    ///   overflow (nothing is mutated)
    ///
    /// All structural errors abort before any lock is taken, except
    /// overflow, which aborts under lock before either write.
    pub fn transfer(
        &self,
        from_id: &str,
        to_id: &str,
        amount: Decimal,
    ) -> Result<TransferOutcome, LedgerError> {
        Self::validate_request(from_id, to_id, amount)?;

        // Existence check before locking so structural errors never touch
        // the locks
        for id in [from_id, to_id] {
            if !self.store.contains(id) {
                return Err(LedgerError::account_not_found(id));
            }
        }

        let status = self.locked_apply(from_id, to_id, amount)?;
        // Both locks are released here; notifications must not extend the
        // lock hold time across an external-collaborator call.

        let from = self.store.get(from_id)?;
        let to = self.store.get(to_id)?;

        match status {
            TransferStatus::Completed => {
                debug!(from = %from.id, to = %to.id, %amount, "transfer applied");
                self.dispatch_notifications(&from, &to, amount);
            }
            TransferStatus::Rejected(ref reason) => {
                debug!(from = %from.id, to = %to.id, %amount, ?reason, "transfer rejected");
            }
        }

        Ok(TransferOutcome { status, from, to })
    }

    /// Balance check and mutation under both account locks
    fn locked_apply(
        &self,
        from_id: &str,
        to_id: &str,
        amount: Decimal,
    ) -> Result<TransferStatus, LedgerError> {
        let (first, second) = self.locks.ordered_pair(from_id, to_id);
        let _first = lock(&first);
        let _second = lock(&second);

        // Re-read under lock; the pre-lock snapshots may be stale
        let from = self.store.get(from_id)?;
        let to = self.store.get(to_id)?;

        // Strict comparison: a transfer of the exact full balance is rejected
        if from.balance <= amount {
            return Ok(TransferStatus::Rejected(RejectReason::InsufficientFunds));
        }

        // Prepare both legs before either write becomes visible
        let debited = from
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("debit", from_id))?;
        let credited = to
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("credit", to_id))?;

        // Accounts are never deleted, so neither update can miss once the
        // pair resolved above
        self.store.update(Account::new(from_id, debited))?;
        self.store.update(Account::new(to_id, credited))?;

        Ok(TransferStatus::Completed)
    }

    /// Notify both parties of a completed transfer
    ///
    /// Failures are logged and swallowed; the transfer is complete once the
    /// funds are moved.
    fn dispatch_notifications(&self, from: &Account, to: &Account, amount: Decimal) {
        let debtor_message = format!("UPDATE: {amount} {DEBIT_NOTICE} {}", to.id);
        if let Err(e) = self.sink.notify(from, &debtor_message) {
            warn!(account = %from.id, error = %e, "debtor notification failed");
        }

        let creditor_message = format!("{CREDIT_NOTICE} {amount} from account {}", from.id);
        if let Err(e) = self.sink.notify(to, &creditor_message) {
            warn!(account = %to.id, error = %e, "creditor notification failed");
        }
    }

    fn validate_request(from_id: &str, to_id: &str, amount: Decimal) -> Result<(), LedgerError> {
        if from_id.is_empty() || to_id.is_empty() {
            return Err(LedgerError::invalid_request(
                "account identifiers must not be empty",
            ));
        }
        if from_id == to_id {
            return Err(LedgerError::invalid_request(format!(
                "source and destination are the same account '{from_id}'"
            )));
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_request(format!(
                "amount must be positive, got {amount}"
            )));
        }
        Ok(())
    }
}

impl Default for TransferEngine {
    /// Engine wired to the logging sink
    fn default() -> Self {
        Self::new(Arc::new(LoggingSink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::test_sinks::{FailingSink, RecordingSink};
    use rust_decimal::Decimal;

    fn engine_with_accounts(accounts: &[(&str, i64)]) -> TransferEngine {
        let engine = TransferEngine::default();
        for (id, balance) in accounts {
            engine
                .create_account(Account::new(*id, Decimal::new(*balance, 0)))
                .unwrap();
        }
        engine
    }

    #[test]
    fn test_transfer_moves_amount_between_accounts() {
        let engine = engine_with_accounts(&[("123A001", 120000), ("123A002", 100000)]);

        let outcome = engine
            .transfer("123A001", "123A002", Decimal::new(10000, 0))
            .unwrap();

        assert!(outcome.status.is_completed());
        assert_eq!(outcome.from.balance, Decimal::new(110000, 0));
        assert_eq!(outcome.to.balance, Decimal::new(110000, 0));
    }

    #[test]
    fn test_transfer_preserves_total_balance() {
        let engine = engine_with_accounts(&[("A", 700), ("B", 300)]);

        engine.transfer("A", "B", Decimal::new(250, 0)).unwrap();

        let total: Decimal = engine.accounts().iter().map(|a| a.balance).sum();
        assert_eq!(total, Decimal::new(1000, 0));
    }

    #[test]
    fn test_insufficient_funds_rejects_without_mutation() {
        let engine = engine_with_accounts(&[("A", 5000), ("B", 0)]);

        let outcome = engine.transfer("A", "B", Decimal::new(10000, 0)).unwrap();

        assert_eq!(
            outcome.status,
            TransferStatus::Rejected(RejectReason::InsufficientFunds)
        );
        assert_eq!(outcome.from.balance, Decimal::new(5000, 0));
        assert_eq!(outcome.to.balance, Decimal::ZERO);
    }

    #[test]
    fn test_exact_balance_is_rejected() {
        // Boundary: the debit requires balance > amount, not >=
        let engine = engine_with_accounts(&[("A", 5000), ("B", 0)]);

        let outcome = engine.transfer("A", "B", Decimal::new(5000, 0)).unwrap();

        assert_eq!(
            outcome.status,
            TransferStatus::Rejected(RejectReason::InsufficientFunds)
        );
        assert_eq!(engine.account("A").unwrap().balance, Decimal::new(5000, 0));
        assert_eq!(engine.account("B").unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_one_above_exact_balance_is_accepted() {
        let engine = engine_with_accounts(&[("A", 5001), ("B", 0)]);

        let outcome = engine.transfer("A", "B", Decimal::new(5000, 0)).unwrap();

        assert!(outcome.status.is_completed());
        assert_eq!(outcome.from.balance, Decimal::ONE);
    }

    #[test]
    fn test_overflowing_credit_aborts_without_mutation() {
        let engine = TransferEngine::default();
        engine
            .create_account(Account::new("A", Decimal::TEN))
            .unwrap();
        engine
            .create_account(Account::new("B", Decimal::MAX))
            .unwrap();

        let result = engine.transfer("A", "B", Decimal::ONE);

        assert!(matches!(
            result.unwrap_err(),
            LedgerError::ArithmeticOverflow { .. }
        ));
        // Aborted before either write: neither leg is visible
        assert_eq!(engine.account("A").unwrap().balance, Decimal::TEN);
        assert_eq!(engine.account("B").unwrap().balance, Decimal::MAX);
    }

    #[test]
    fn test_transfer_to_same_account_is_invalid() {
        let engine = engine_with_accounts(&[("A", 1000)]);

        let result = engine.transfer("A", "A", Decimal::ONE);

        assert!(matches!(
            result.unwrap_err(),
            LedgerError::InvalidRequest { .. }
        ));
    }

    #[test]
    fn test_zero_and_negative_amounts_are_invalid() {
        let engine = engine_with_accounts(&[("A", 1000), ("B", 1000)]);

        for amount in [Decimal::ZERO, Decimal::new(-1, 0)] {
            let result = engine.transfer("A", "B", amount);
            assert!(matches!(
                result.unwrap_err(),
                LedgerError::InvalidRequest { .. }
            ));
        }
    }

    #[test]
    fn test_empty_identifier_is_invalid() {
        let engine = engine_with_accounts(&[("A", 1000)]);

        let result = engine.transfer("", "A", Decimal::ONE);

        assert!(matches!(
            result.unwrap_err(),
            LedgerError::InvalidRequest { .. }
        ));
    }

    #[test]
    fn test_unknown_account_fails_before_mutation() {
        let engine = engine_with_accounts(&[("A", 1000)]);

        let result = engine.transfer("A", "MISSING", Decimal::ONE);

        assert!(matches!(
            result.unwrap_err(),
            LedgerError::AccountNotFound { .. }
        ));
        assert_eq!(engine.account("A").unwrap().balance, Decimal::new(1000, 0));
    }

    #[test]
    fn test_create_duplicate_account_fails() {
        let engine = engine_with_accounts(&[("A", 1000)]);

        let result = engine.create_account(Account::new("A", Decimal::ZERO));

        assert!(matches!(
            result.unwrap_err(),
            LedgerError::DuplicateAccount { .. }
        ));
    }

    #[test]
    fn test_create_account_with_empty_id_fails() {
        let engine = TransferEngine::default();

        let result = engine.create_account(Account::new("", Decimal::ZERO));

        assert!(matches!(
            result.unwrap_err(),
            LedgerError::InvalidRequest { .. }
        ));
    }

    #[test]
    fn test_notifications_reach_both_parties() {
        let sink = Arc::new(RecordingSink::default());
        let engine = TransferEngine::new(sink.clone());
        engine
            .create_account(Account::new("A", Decimal::new(1000, 0)))
            .unwrap();
        engine
            .create_account(Account::new("B", Decimal::new(0, 0)))
            .unwrap();

        engine.transfer("A", "B", Decimal::new(100, 0)).unwrap();

        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 2);
        // Debtor hears about the payment to the counterparty
        assert_eq!(delivered[0].0, "A");
        assert!(delivered[0].1.contains("100"));
        assert!(delivered[0].1.contains("account B"));
        // Creditor hears about the credit from the counterparty
        assert_eq!(delivered[1].0, "B");
        assert!(delivered[1].1.contains("credited with 100"));
        assert!(delivered[1].1.contains("account A"));
    }

    #[test]
    fn test_rejected_transfer_sends_no_notifications() {
        let sink = Arc::new(RecordingSink::default());
        let engine = TransferEngine::new(sink.clone());
        engine
            .create_account(Account::new("A", Decimal::new(50, 0)))
            .unwrap();
        engine
            .create_account(Account::new("B", Decimal::ZERO))
            .unwrap();

        engine.transfer("A", "B", Decimal::new(100, 0)).unwrap();

        assert!(sink.delivered.lock().unwrap().is_empty());
    }

    #[test]
    fn test_notification_failure_does_not_fail_transfer() {
        let engine = TransferEngine::new(Arc::new(FailingSink));
        engine
            .create_account(Account::new("A", Decimal::new(1000, 0)))
            .unwrap();
        engine
            .create_account(Account::new("B", Decimal::ZERO))
            .unwrap();

        let outcome = engine.transfer("A", "B", Decimal::new(100, 0)).unwrap();

        assert!(outcome.status.is_completed());
        assert_eq!(outcome.from.balance, Decimal::new(900, 0));
        assert_eq!(outcome.to.balance, Decimal::new(100, 0));
    }

    #[test]
    fn test_opposite_direction_transfers_never_deadlock() {
        use std::thread;

        let engine = engine_with_accounts(&[("A", 100_000), ("B", 100_000)]);
        let forward = engine.clone();
        let backward = engine.clone();

        let t1 = thread::spawn(move || {
            for _ in 0..1000 {
                forward.transfer("A", "B", Decimal::ONE).unwrap();
            }
        });
        let t2 = thread::spawn(move || {
            for _ in 0..1000 {
                backward.transfer("B", "A", Decimal::ONE).unwrap();
            }
        });

        t1.join().unwrap();
        t2.join().unwrap();

        // Equal traffic both ways: balances end where they started
        assert_eq!(engine.account("A").unwrap().balance, Decimal::new(100_000, 0));
        assert_eq!(engine.account("B").unwrap().balance, Decimal::new(100_000, 0));
    }

    #[test]
    fn test_concurrent_transfers_conserve_total() {
        use std::thread;

        let engine = engine_with_accounts(&[("A", 10_000), ("B", 10_000), ("C", 10_000)]);
        let mut handles = vec![];

        let routes = [("A", "B"), ("B", "C"), ("C", "A"), ("B", "A")];
        for (from, to) in routes {
            let engine = engine.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..500 {
                    // Rejections are fine; only conservation matters here
                    engine.transfer(from, to, Decimal::new(7, 0)).unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let total: Decimal = engine.accounts().iter().map(|a| a.balance).sum();
        assert_eq!(total, Decimal::new(30_000, 0));
        for account in engine.accounts() {
            assert!(account.balance >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_disjoint_pairs_are_deterministic() {
        use std::thread;

        // Transfers on (A,B) and (C,D) share nothing; every interleaving
        // yields the same final balances.
        let engine = engine_with_accounts(&[("A", 1000), ("B", 0), ("C", 1000), ("D", 0)]);
        let left = engine.clone();
        let right = engine.clone();

        let t1 = thread::spawn(move || {
            for _ in 0..100 {
                left.transfer("A", "B", Decimal::new(5, 0)).unwrap();
            }
        });
        let t2 = thread::spawn(move || {
            for _ in 0..100 {
                right.transfer("C", "D", Decimal::new(5, 0)).unwrap();
            }
        });

        t1.join().unwrap();
        t2.join().unwrap();

        assert_eq!(engine.account("A").unwrap().balance, Decimal::new(500, 0));
        assert_eq!(engine.account("B").unwrap().balance, Decimal::new(500, 0));
        assert_eq!(engine.account("C").unwrap().balance, Decimal::new(500, 0));
        assert_eq!(engine.account("D").unwrap().balance, Decimal::new(500, 0));
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransferEngine>();
    }
}

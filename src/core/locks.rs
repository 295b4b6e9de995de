//! Per-account lock table with deterministic pair ordering
//!
//! This module provides the `LockTable` struct, which maps account
//! identifiers to dedicated mutexes. The transfer engine holds the two
//! mutexes of a transfer's account pair across the balance check and
//! mutation; `DashMap`'s own entry guards cannot express that hold, which is
//! why the locks live in a separate table.
//!
//! # Deadlock Freedom
//!
//! Two transfers moving money in opposite directions between the same pair
//! of accounts would deadlock if each locked its source first. The table
//! therefore orders every pair by byte-wise identifier comparison: all
//! transfers touching accounts A and B acquire the lexicographically smaller
//! identifier's lock first, regardless of transfer direction. With a single
//! total order there is no circular wait.

use crate::types::AccountId;
use dashmap::DashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle to one account's mutex
pub type LockHandle = Arc<Mutex<()>>;

/// Table of per-account mutexes, keyed by identifier
///
/// Lock entries are created on demand and never removed, matching the
/// account lifecycle (accounts are never deleted). Transfers touching
/// disjoint account pairs proceed fully in parallel.
#[derive(Debug, Default)]
pub struct LockTable {
    locks: DashMap<AccountId, LockHandle>,
}

impl LockTable {
    /// Create an empty lock table
    pub fn new() -> Self {
        LockTable {
            locks: DashMap::new(),
        }
    }

    /// Get or create the mutex handle for an account
    pub fn handle(&self, id: &str) -> LockHandle {
        if let Some(existing) = self.locks.get(id) {
            return Arc::clone(existing.value());
        }
        self.locks
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Lock handles for a pair of accounts, in global acquisition order
    ///
    /// The first handle always belongs to the byte-wise smaller identifier,
    /// independent of which account is the source. Callers must acquire the
    /// handles in the returned order.
    ///
    /// The identifiers must be distinct; the transfer engine rejects
    /// same-account transfers before reaching the lock table.
    pub fn ordered_pair(&self, a: &str, b: &str) -> (LockHandle, LockHandle) {
        debug_assert_ne!(a, b, "lock pair requires distinct accounts");
        if a < b {
            (self.handle(a), self.handle(b))
        } else {
            (self.handle(b), self.handle(a))
        }
    }
}

/// Acquire a mutex, recovering the guard if a previous holder panicked
///
/// The lock only guards the *right* to mutate; the account data itself lives
/// in the store, so a poisoned mutex carries no torn state worth rejecting.
pub fn lock(handle: &Mutex<()>) -> MutexGuard<'_, ()> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

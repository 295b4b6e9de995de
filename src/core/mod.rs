//! Core business logic for the ledger engine
//!
//! This module contains the main components:
//! - `store`: keyed in-memory account table
//! - `locks`: per-account lock table with deterministic pair ordering
//! - `engine`: the transfer protocol (validate, lock, check, mutate, notify)
//! - `notify`: the notification sink seam

pub mod engine;
pub mod locks;
pub mod notify;
pub mod store;

pub use engine::TransferEngine;
pub use locks::LockTable;
pub use notify::{LoggingSink, NotificationError, NotificationSink};
pub use store::AccountStore;

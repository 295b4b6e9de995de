//! Concurrency properties of the transfer engine
//!
//! Exercises the engine from many OS threads at once to check the three
//! guarantees the lock design is supposed to buy:
//! - opposite-direction transfers on the same account pair never deadlock
//! - money is conserved under arbitrary interleavings
//! - transfers on disjoint account pairs settle deterministically

use ledger_engine::{Account, TransferEngine, TransferStatus};
use rust_decimal::Decimal;
use std::thread;

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
fn opposite_direction_transfers_terminate() {
    let engine = engine_with_accounts(&[("alpha", 50_000), ("beta", 50_000)]);
    let mut handles = vec![];

    // Four threads each way, all hammering the same pair. Without ordered
    // lock acquisition this interleaving deadlocks almost immediately.
    for i in 0..8 {
        let engine = engine.clone();
        handles.push(thread::spawn(move || {
            let (from, to) = if i % 2 == 0 {
                ("alpha", "beta")
            } else {
                ("beta", "alpha")
            };
            for _ in 0..2_000 {
                engine.transfer(from, to, Decimal::new(3, 0)).unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let total: Decimal = engine.accounts().iter().map(|a| a.balance).sum();
    assert_eq!(total, Decimal::new(100_000, 0));
}

#[test]
fn money_is_conserved_across_a_ring_of_accounts() {
    let ids = ["a", "b", "c", "d", "e"];
    let seeded: Vec<(&str, i64)> = ids.iter().map(|id| (*id, 1_000i64)).collect();
    let engine = engine_with_accounts(&seeded);
    let mut handles = vec![];

    // Each thread walks the ring in a different direction with a different
    // amount; rejections are expected once balances run low.
    for (offset, amount) in [(1usize, 7i64), (2, 11), (3, 13), (4, 17)] {
        let engine = engine.clone();
        handles.push(thread::spawn(move || {
            let ids = ["a", "b", "c", "d", "e"];
            for round in 0..1_000 {
                let from = ids[round % ids.len()];
                let to = ids[(round + offset) % ids.len()];
                engine.transfer(from, to, Decimal::new(amount, 0)).unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let accounts = engine.accounts();
    let total: Decimal = accounts.iter().map(|a| a.balance).sum();
    assert_eq!(total, Decimal::new(5_000, 0));
    for account in accounts {
        assert!(
            account.balance >= Decimal::ZERO,
            "account {} went negative: {}",
            account.id,
            account.balance
        );
    }
}

#[test]
fn disjoint_pairs_settle_independently_of_interleaving() {
    let engine = engine_with_accounts(&[
        ("p1-src", 10_000),
        ("p1-dst", 0),
        ("p2-src", 10_000),
        ("p2-dst", 0),
        ("p3-src", 10_000),
        ("p3-dst", 0),
    ]);
    let mut handles = vec![];

    for pair in ["p1", "p2", "p3"] {
        let engine = engine.clone();
        handles.push(thread::spawn(move || {
            let from = format!("{pair}-src");
            let to = format!("{pair}-dst");
            for _ in 0..500 {
                let outcome = engine.transfer(&from, &to, Decimal::new(4, 0)).unwrap();
                assert!(outcome.status.is_completed());
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // Every pair saw exactly its own 500 transfers of 4
    for pair in ["p1", "p2", "p3"] {
        let src = engine.account(&format!("{pair}-src")).unwrap();
        let dst = engine.account(&format!("{pair}-dst")).unwrap();
        assert_eq!(src.balance, Decimal::new(8_000, 0));
        assert_eq!(dst.balance, Decimal::new(2_000, 0));
    }
}

#[test]
fn contended_source_never_overdraws() {
    // Many threads drain one account; the strict balance check under lock
    // must keep it positive no matter the interleaving.
    let engine = engine_with_accounts(&[("hot", 101), ("sink", 0)]);
    let mut handles = vec![];

    for _ in 0..8 {
        let engine = engine.clone();
        handles.push(thread::spawn(move || {
            let mut completed = 0u32;
            for _ in 0..100 {
                let outcome = engine.transfer("hot", "sink", Decimal::new(10, 0)).unwrap();
                if outcome.status == TransferStatus::Completed {
                    completed += 1;
                }
            }
            completed
        }));
    }

    let completed: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    // 101 allows exactly ten debits of 10; the eleventh would need > 10
    assert_eq!(completed, 10);
    assert_eq!(engine.account("hot").unwrap().balance, Decimal::new(1, 0));
    assert_eq!(engine.account("sink").unwrap().balance, Decimal::new(100, 0));
}

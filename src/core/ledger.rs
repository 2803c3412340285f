//! Per-account ledger with a standing consistency invariant
//!
//! This module provides the `Ledger` struct: one account's balance plus its
//! append-only entry history, guarded by a single reader/writer lock.
//!
//! # Consistency
//!
//! The invariant `balance == sum(entry.amount for entry in entries)` holds at
//! every externally observable instant. Both fields live behind the same
//! `RwLock`, and `apply` mutates them together in one write critical section,
//! so a reader can never observe a balance adjustment without its entry or
//! vice versa.
//!
//! # Thread Safety
//!
//! Writers to the same ledger serialize on the write lock; writers to
//! different ledgers never contend. Readers take the shared lock and never
//! block each other.

use crate::types::{AccountId, Action, LedgerEntry};
use log::debug;
use rust_decimal::Decimal;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use std::time::SystemTime;

/// Balance and entry log, always mutated together
#[derive(Debug, Default)]
struct LedgerState {
    balance: Decimal,
    entries: Vec<LedgerEntry>,
}

/// One account's balance and append-only transaction history
///
/// Created empty (zero balance, no entries) and mutated only through
/// [`Ledger::apply`]. Ledgers are never deleted during the process lifetime.
#[derive(Debug)]
pub struct Ledger {
    /// The account this ledger belongs to
    id: AccountId,

    /// Balance and entries behind one lock, keeping them consistent
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// Create an empty ledger for the given account
    pub fn new(id: AccountId) -> Self {
        Ledger {
            id,
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// The account this ledger belongs to
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Current balance
    ///
    /// Consistent with the most recently completed apply: an in-progress
    /// apply is either fully visible or not visible at all.
    pub fn balance(&self) -> Decimal {
        self.read().balance
    }

    /// Snapshot of the entry history at call time
    ///
    /// The returned vector is a copy; mutating it does not affect the
    /// ledger, and later applies do not affect the returned snapshot.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.read().entries.clone()
    }

    /// Balance and entry snapshot taken under a single read lock
    ///
    /// Unlike calling [`Ledger::balance`] and [`Ledger::entries`] back to
    /// back, the pair returned here is guaranteed mutually consistent:
    /// the balance equals the sum of the returned entries' amounts.
    pub fn snapshot(&self) -> (Decimal, Vec<LedgerEntry>) {
        let state = self.read();
        (state.balance, state.entries.clone())
    }

    /// Number of entries applied so far
    pub fn entry_count(&self) -> usize {
        self.read().entries.len()
    }

    /// Atomically append an entry and adjust the balance
    ///
    /// The signed `amount` is added to the balance and recorded as an entry
    /// in the same write critical section. Overdraft is allowed: any finite
    /// amount is accepted and the balance may go negative.
    ///
    /// # Returns
    ///
    /// The balance immediately after this apply, read while still holding
    /// the write lock, so no concurrent apply can slip in between the
    /// mutation and the returned value.
    pub fn apply(&self, timestamp: SystemTime, amount: Decimal, action: Action) -> Decimal {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        state.entries.push(LedgerEntry {
            timestamp,
            amount,
            action,
        });
        state.balance += amount;
        debug!(
            "account {}: applied {} {}, new balance {}",
            self.id, action, amount, state.balance
        );
        state.balance
    }

    // Balance and entries are always written together, so the state behind a
    // poisoned lock is still consistent and can be recovered.
    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> SystemTime {
        SystemTime::now()
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = Ledger::new(7);

        assert_eq!(ledger.id(), 7);
        assert_eq!(ledger.balance(), Decimal::ZERO);
        assert!(ledger.entries().is_empty());
    }

    #[test]
    fn test_apply_returns_post_apply_balance() {
        let ledger = Ledger::new(1);

        let balance = ledger.apply(now(), Decimal::new(10000, 2), Action::Deposit);
        assert_eq!(balance, Decimal::new(10000, 2));

        let balance = ledger.apply(now(), Decimal::new(-3000, 2), Action::Withdraw);
        assert_eq!(balance, Decimal::new(7000, 2));
    }

    #[test]
    fn test_apply_preserves_order() {
        let ledger = Ledger::new(1);

        ledger.apply(now(), Decimal::new(100, 0), Action::Deposit);
        ledger.apply(now(), Decimal::new(-30, 0), Action::Withdraw);

        let entries = ledger.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].amount, Decimal::new(100, 0));
        assert_eq!(entries[0].action, Action::Deposit);
        assert_eq!(entries[1].amount, Decimal::new(-30, 0));
        assert_eq!(entries[1].action, Action::Withdraw);
        assert_eq!(ledger.balance(), Decimal::new(70, 0));
    }

    #[test]
    fn test_overdraft_is_allowed() {
        let ledger = Ledger::new(1);

        let balance = ledger.apply(now(), Decimal::new(-50, 0), Action::Withdraw);

        assert_eq!(balance, Decimal::new(-50, 0));
        assert_eq!(ledger.balance(), Decimal::new(-50, 0));
        assert_eq!(ledger.entry_count(), 1);
    }

    #[test]
    fn test_entries_snapshot_does_not_alias_internal_state() {
        let ledger = Ledger::new(1);
        ledger.apply(now(), Decimal::ONE, Action::Deposit);

        let mut snapshot = ledger.entries();
        snapshot.clear();

        // Caller mutation of the snapshot must not affect the ledger
        assert_eq!(ledger.entry_count(), 1);

        // And later applies must not show up in an earlier snapshot
        let before = ledger.entries();
        ledger.apply(now(), Decimal::ONE, Action::Deposit);
        assert_eq!(before.len(), 1);
        assert_eq!(ledger.entry_count(), 2);
    }

    #[test]
    fn test_snapshot_balance_matches_entry_sum() {
        let ledger = Ledger::new(1);
        ledger.apply(now(), Decimal::new(125, 1), Action::Deposit);
        ledger.apply(now(), Decimal::new(-25, 1), Action::Withdraw);
        ledger.apply(now(), Decimal::new(300, 1), Action::Deposit);

        let (balance, entries) = ledger.snapshot();
        let sum: Decimal = entries.iter().map(|e| e.amount).sum();

        assert_eq!(balance, sum);
        assert_eq!(balance, Decimal::new(400, 1));
    }

    // Concurrency tests: writers race on one ledger while a checker thread
    // repeatedly takes consistent snapshots.
    #[test]
    fn test_concurrent_applies_keep_invariant() {
        use std::sync::Arc;
        use std::thread;

        let ledger = Arc::new(Ledger::new(1));
        let mut handles = vec![];

        for i in 0..8 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                for _ in 0..250 {
                    if i % 2 == 0 {
                        ledger.apply(now(), Decimal::new(10, 0), Action::Deposit);
                    } else {
                        ledger.apply(now(), Decimal::new(-10, 0), Action::Withdraw);
                    }
                }
            }));
        }

        // Checker observes the invariant while writers are running
        let checker = {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                for _ in 0..500 {
                    let (balance, entries) = ledger.snapshot();
                    let sum: Decimal = entries.iter().map(|e| e.amount).sum();
                    assert_eq!(balance, sum);
                }
            })
        };

        for handle in handles {
            handle.join().unwrap();
        }
        checker.join().unwrap();

        // 4 depositing threads and 4 withdrawing threads cancel out
        assert_eq!(ledger.balance(), Decimal::ZERO);
        assert_eq!(ledger.entry_count(), 2000);
    }

    #[test]
    fn test_concurrent_applies_lose_no_entries() {
        use std::sync::Arc;
        use std::thread;

        let ledger = Arc::new(Ledger::new(1));
        let mut handles = vec![];

        for _ in 0..10 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    ledger.apply(now(), Decimal::ONE, Action::Deposit);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.entry_count(), 1000);
        assert_eq!(ledger.balance(), Decimal::new(1000, 0));
    }
}

//! Thread-safe account registry
//!
//! This module provides the `LedgerRegistry` struct, which maps account
//! identifiers to their ledgers and creates ledgers on first use.
//!
//! # Design
//!
//! The registry uses `DashMap` (a concurrent HashMap) so that
//! create-if-absent is atomic: two callers racing on the same unseen
//! account id both observe the one ledger that wins insertion, and no
//! instance is ever duplicated or lost. Ledgers are handed out as
//! `Arc<Ledger>`, so callers on different accounts never contend at the
//! registry level once the lookup completes.
//!
//! # Thread Safety
//!
//! All operations are safe under unbounded concurrent calls. DashMap's
//! internal sharding keeps lookups for different accounts from blocking
//! each other.

use crate::core::ledger::Ledger;
use crate::types::{AccountId, Action};
use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::SystemTime;

/// Maps account identifiers to ledgers, creating them on first use
///
/// Exactly one `Ledger` instance exists per account id for the registry's
/// lifetime; ledgers are never removed.
#[derive(Debug, Default)]
pub struct LedgerRegistry {
    /// Concurrent map of account id to its ledger
    ledgers: DashMap<AccountId, Arc<Ledger>>,
}

impl LedgerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        LedgerRegistry {
            ledgers: DashMap::new(),
        }
    }

    /// Get the ledger for an account, creating it if absent
    ///
    /// Atomic under concurrent calls: two callers racing with the same id
    /// both receive the same ledger instance.
    pub fn get_or_create(&self, account: AccountId) -> Arc<Ledger> {
        self.ledgers
            .entry(account)
            .or_insert_with(|| {
                debug!("creating ledger for account {}", account);
                Arc::new(Ledger::new(account))
            })
            .clone()
    }

    /// Look up an existing ledger without creating one
    pub fn get(&self, account: AccountId) -> Option<Arc<Ledger>> {
        self.ledgers.get(&account).map(|entry| entry.value().clone())
    }

    /// Number of accounts seen so far
    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    /// Whether any account has been created yet
    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }

    /// Apply one validated transaction to its account
    ///
    /// Resolves the signed amount (withdraw negates, deposit keeps the
    /// amount positive) and applies it to the account's ledger. This is the
    /// only path through which the pipeline touches ledger state.
    ///
    /// # Returns
    ///
    /// The post-apply balance, taken atomically with the apply inside the
    /// ledger's write lock. No concurrent apply can be observed instead.
    pub fn apply_transaction(
        &self,
        account: AccountId,
        action: Action,
        amount: Decimal,
    ) -> Decimal {
        let ledger = self.get_or_create(account);
        ledger.apply(SystemTime::now(), action.signed_amount(amount), action)
    }
}

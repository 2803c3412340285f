//! Core business logic module
//!
//! This module contains the concurrent ledger components:
//! - `ledger` - One account's balance and append-only entry history
//! - `registry` - Thread-safe account-id-to-ledger map with atomic
//!   create-if-absent semantics

pub mod ledger;
pub mod registry;

pub use ledger::Ledger;
pub use registry::LedgerRegistry;

//! Account and ledger-entry types
//!
//! This module defines the account identifier, the transaction actions the
//! system understands, and the ledger entry appended for every applied
//! transaction.

use rust_decimal::Decimal;
use std::fmt;
use std::time::SystemTime;

/// Account identifier
///
/// Opaque integer id as it appears in the first field of a source line.
/// Signed, so ids that parse as negative integers are accepted.
pub type AccountId = i64;

/// Transaction actions supported by the ingestion pipeline
///
/// The action keyword in a source line is matched case-insensitively.
/// Deposits credit the account, withdrawals debit it; overdraft is allowed,
/// so a withdrawal never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    ///
    /// No funds check is made; the balance may go negative.
    Withdraw,
}

impl Action {
    /// Parse an action keyword, case-insensitively
    ///
    /// Returns `None` for anything other than `deposit` or `withdraw`.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("deposit") {
            Some(Action::Deposit)
        } else if token.eq_ignore_ascii_case("withdraw") {
            Some(Action::Withdraw)
        } else {
            None
        }
    }

    /// Resolve the signed ledger amount for this action
    ///
    /// Withdrawals negate the given (non-negative) amount; deposits keep it
    /// positive. The result is what gets appended to the entry log and added
    /// to the balance.
    pub fn signed_amount(self, amount: Decimal) -> Decimal {
        match self {
            Action::Deposit => amount,
            Action::Withdraw => -amount,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Deposit => write!(f, "deposit"),
            Action::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// One line of an account's append-only history
///
/// Entries are only ever created by `Ledger::apply`, which adjusts the
/// balance by `amount` in the same critical section. The amount is signed:
/// negative for withdrawals, positive for deposits.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    /// When the entry was applied
    pub timestamp: SystemTime,

    /// Signed amount added to the balance
    pub amount: Decimal,

    /// The action that produced this entry
    pub action: Action,
}

//! Transient records flowing through the ingestion pipeline
//!
//! This module defines the validated transaction record produced by the
//! parser, the report job handed to the asynchronous reporting channel, and
//! the per-run summary returned to the pipeline's caller.

use super::entry::{AccountId, Action};
use rust_decimal::Decimal;
use std::time::SystemTime;

/// Validated transaction record from one source line
///
/// Produced by the parser and consumed exactly once by the pipeline. The
/// amount is the raw non-negative value from the source line; the sign is
/// derived from the action at apply time, never parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// The account this transaction applies to
    pub account: AccountId,

    /// Deposit or withdraw
    pub action: Action,

    /// Non-negative transaction amount as given in the source
    pub amount: Decimal,
}

/// Snapshot of one applied transaction, destined for the reporting sink
///
/// Constructed immediately after the ledger apply, using the balance
/// returned by the apply call itself. Later concurrent mutations of the
/// ledger cannot change an in-flight job.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportJob {
    /// The account the transaction was applied to
    pub account: AccountId,

    /// When the job was created
    pub timestamp: SystemTime,

    /// Non-negative transaction amount as given in the source
    pub amount: Decimal,

    /// Account balance immediately after the apply
    pub balance: Decimal,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Number of records applied to ledgers
    pub applied: u64,

    /// Number of source lines rejected by the parser
    pub rejected: u64,

    /// Whether the reporting backlog fully drained within the grace period
    ///
    /// `false` means the drain timeout elapsed and remaining report jobs
    /// were dropped (reporting is best-effort).
    pub drained: bool,
}

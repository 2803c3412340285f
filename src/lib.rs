//! Ledger Ingest Library
//! # Overview
//!
//! This library ingests a stream of account transactions (deposit/withdraw
//! records), applies them to concurrent per-account ledgers, and
//! asynchronously mirrors each applied transaction to an external reporting
//! sink.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (LedgerEntry, TransactionRecord, ReportJob,
//!   errors)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Concurrent ledger state:
//!   - [`core::ledger`] - Per-account balance + append-only entry log
//!   - [`core::registry`] - Atomic create-on-first-use account map
//! - [`io`] - Line parsing and batched source reading
//! - [`pipeline`] - Ingestion orchestration, reporting workers, and
//!   shutdown drain
//!
//! # Guarantees
//!
//! - A ledger's balance always equals the sum of its entries, at every
//!   instant a reader can observe
//! - Exactly one ledger exists per account id, however many callers race
//!   to create it
//! - Records are applied strictly in source order; rejected lines are
//!   skipped without disturbing that order
//! - Reporting never blocks ingestion; on shutdown the backlog is drained
//!   within a bounded grace period, after which delivery is abandoned
//!   (best-effort)

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use crate::core::{Ledger, LedgerRegistry};
pub use io::parse_line;
pub use pipeline::{IngestPipeline, LogSink, PipelineConfig, ReportSink, Reporter};
pub use types::{
    AccountId, Action, IngestError, IngestSummary, LedgerEntry, ParseError, ReportJob, SinkError,
    TransactionRecord,
};

//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `entry`: Account identifiers, actions, and ledger entries
//! - `record`: Transient records flowing through the ingestion pipeline
//! - `error`: Error types for ingestion, parsing, and reporting

pub mod entry;
pub mod error;
pub mod record;

pub use entry::{AccountId, Action, LedgerEntry};
pub use error::{IngestError, ParseError, SinkError};
pub use record::{IngestSummary, ReportJob, TransactionRecord};

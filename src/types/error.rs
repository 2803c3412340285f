//! Error types for the ledger ingestion pipeline
//!
//! The error taxonomy follows three tiers:
//!
//! - **Fatal** ([`IngestError`]): the source cannot be opened or read, or
//!   the runtime cannot be built. Propagated to the pipeline's caller and
//!   aborts the run.
//! - **Recoverable-and-skipped** ([`ParseError`]): a single source line is
//!   rejected. Logged by the caller; ingestion continues with the next line.
//! - **Recoverable-and-isolated** ([`SinkError`]): the reporting sink failed
//!   for one job. Logged by the reporting worker; no other job is affected.

use thiserror::Error;

/// Fatal errors that abort an ingestion run
#[derive(Debug, Error)]
pub enum IngestError {
    /// The transaction source could not be opened
    #[error("failed to open transaction source '{path}': {source}")]
    Open {
        /// Path that could not be opened
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An I/O error occurred while reading the source mid-run
    #[error("I/O error reading transaction source: {0}")]
    Io(#[from] std::io::Error),

    /// The async runtime could not be constructed
    #[error("failed to build runtime: {0}")]
    Runtime(std::io::Error),
}

/// Rejection reasons for a single source line
///
/// Each variant corresponds to one validation step of the parser; the first
/// failing step wins. A rejected line is logged and skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line did not split into exactly 3 comma-separated fields
    #[error("expected 3 comma-separated fields")]
    Malformed,

    /// The first field did not parse as an integer account id
    #[error("invalid account id '{0}'")]
    BadAccountId(String),

    /// The second field was neither `deposit` nor `withdraw`
    #[error("unknown action '{0}'")]
    BadAction(String),

    /// The third field did not parse as a non-negative number
    #[error("invalid amount '{0}'")]
    BadAmount(String),
}

/// Failure reported by the external reporting sink for a single job
///
/// Carries an implementation-defined detail message. The pipeline treats
/// any sink failure as non-fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("report sink failure: {message}")]
pub struct SinkError {
    /// Implementation-defined failure detail
    pub message: String,
}

impl SinkError {
    /// Create a SinkError with the given detail message
    pub fn new(message: impl Into<String>) -> Self {
        SinkError {
            message: message.into(),
        }
    }
}

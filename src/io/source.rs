//! Asynchronous transaction source with batch reading
//!
//! Provides a batched record stream over newline-delimited transaction
//! data. Generic over any `AsyncRead`, so the pipeline feeds it a
//! `tokio::fs::File` and tests feed it in-memory buffers.
//!
//! # Design
//!
//! - the first line of the source is always treated as a header and
//!   discarded at construction time
//! - `read_batch` accumulates up to a fixed number of *valid* records;
//!   rejected lines are logged, counted, and skipped without consuming
//!   batch capacity
//! - read I/O errors are fatal and propagate to the caller; validation
//!   failures never are

use crate::io::line_parser::parse_line;
use crate::types::TransactionRecord;
use log::warn;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

/// Batched reader over newline-delimited transaction records
///
/// Tracks how many lines the parser rejected so the pipeline can surface
/// the count in its run summary.
pub struct TransactionSource<R> {
    lines: Lines<BufReader<R>>,
    rejected: u64,
}

impl<R: AsyncRead + Unpin> TransactionSource<R> {
    /// Create a source over a reader, discarding the header line
    ///
    /// The first line is discarded unconditionally. If the data has no
    /// header, the first data line is silently lost; this matches the
    /// legacy source format, which existing producers and fixtures rely on.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading the header line fails.
    pub async fn new(reader: R) -> io::Result<Self> {
        let mut lines = BufReader::new(reader).lines();
        lines.next_line().await?;

        Ok(TransactionSource { lines, rejected: 0 })
    }

    /// Read the next batch of up to `max` valid records
    ///
    /// Reads lines until `max` records have been validated or the source
    /// is exhausted. A line the parser rejects is logged at warn level and
    /// skipped; it does not count toward the batch and does not affect the
    /// ordering of subsequent valid records.
    ///
    /// # Returns
    ///
    /// The records in source order. An empty vector means end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading the source fails mid-batch; this is
    /// fatal for the run.
    pub async fn read_batch(&mut self, max: usize) -> io::Result<Vec<TransactionRecord>> {
        let mut batch = Vec::with_capacity(max);

        while batch.len() < max {
            match self.lines.next_line().await? {
                Some(line) => match parse_line(&line) {
                    Ok(record) => batch.push(record),
                    Err(reason) => {
                        self.rejected += 1;
                        warn!("skipping line '{}': {}", line, reason);
                    }
                },
                None => break,
            }
        }

        Ok(batch)
    }

    /// Number of lines rejected by the parser so far
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

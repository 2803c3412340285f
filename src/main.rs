//! Ledger Ingest CLI
//!
//! Command-line interface for ingesting account transactions from a
//! newline-delimited file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.txt
//! cargo run -- --batch-size 2000 transactions.txt
//! cargo run -- --report-workers 4 --drain-timeout 10 transactions.txt
//! ```
//!
//! The program reads transaction records from the input file (the first
//! line is always treated as a header and discarded), applies them to
//! per-account ledgers, and mirrors each applied transaction to the
//! reporting sink in the background. Rejected lines are logged and skipped.
//!
//! Logging is configured through `RUST_LOG` (e.g. `RUST_LOG=info`).
//!
//! # Exit Codes
//!
//! - 0: Success (including runs with rejected lines)
//! - 1: Fatal error (missing file, unreadable source, etc.)

use ledger_ingest::cli;
use ledger_ingest::{IngestPipeline, LedgerRegistry, LogSink, ReportSink};
use log::info;
use std::process;
use std::sync::Arc;

fn main() {
    env_logger::init();

    let args = cli::parse_args();

    let registry = Arc::new(LedgerRegistry::new());
    let sink: Arc<dyn ReportSink> = Arc::new(LogSink);
    let pipeline = IngestPipeline::new(Arc::clone(&registry), sink, args.to_pipeline_config());

    match pipeline.run(&args.input_file) {
        Ok(summary) => {
            info!(
                "done: {} applied, {} rejected across {} accounts (backlog drained: {})",
                summary.applied,
                summary.rejected,
                registry.len(),
                summary.drained
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

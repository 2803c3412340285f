//! Ingestion pipeline
//!
//! Orchestrates one ingestion run: read the source in bounded batches,
//! apply every record in source order through the registry, and mirror each
//! applied record to the reporting sink via the background reporter.
//!
//! # Architecture
//!
//! ```text
//! IngestPipeline
//!     ├── PipelineConfig          (batch size, workers, drain timeout)
//!     ├── TransactionSource       (header skip + batched parsing)
//!     ├── LedgerRegistry          (apply path, shared ledger state)
//!     └── Reporter                (async reporting channel + workers)
//!         └── dyn ReportSink      (external collaborator)
//! ```
//!
//! # Lifecycle
//!
//! A run moves through reading and applying phases batch by batch, then a
//! draining phase on end of input, and closes once the reporter has drained
//! or the grace period has elapsed. Applying is strictly ordered within the
//! run; reporting happens concurrently and never blocks ingestion.
//!
//! # Failure semantics
//!
//! Opening or reading the source is fatal for the run. A rejected line is
//! logged and skipped. A sink failure is logged and isolated to its job.

pub mod reporter;
pub mod sink;

pub use reporter::Reporter;
pub use sink::{LogSink, ReportSink};

use crate::core::LedgerRegistry;
use crate::io::TransactionSource;
use crate::types::{IngestError, IngestSummary, ReportJob};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Configuration for an ingestion run
///
/// Zero values for `batch_size` or `report_workers` fall back to the
/// defaults with a logged warning.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Number of valid records accumulated per read cycle
    pub batch_size: usize,

    /// Number of background reporting workers
    ///
    /// The default of 1 preserves report submission order at the sink.
    /// More than one worker raises throughput but leaves delivery order
    /// unspecified.
    pub report_workers: usize,

    /// Grace period granted to the reporting backlog during shutdown
    pub drain_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            report_workers: 1,
            drain_timeout: Duration::from_secs(60),
        }
    }
}

impl PipelineConfig {
    /// Create a PipelineConfig with custom values
    pub fn new(batch_size: usize, report_workers: usize, drain_timeout: Duration) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "invalid batch_size (0), using default ({})",
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let report_workers = if report_workers == 0 {
            warn!(
                "invalid report_workers (0), using default ({})",
                default.report_workers
            );
            default.report_workers
        } else {
            report_workers
        };

        Self {
            batch_size,
            report_workers,
            drain_timeout,
        }
    }
}

/// Orchestrates ingestion runs against a shared registry and sink
///
/// The registry and sink are shared handles: callers keep their own
/// `Arc`s to inspect ledger state after a run or to reuse the registry
/// across runs.
pub struct IngestPipeline {
    registry: Arc<LedgerRegistry>,
    sink: Arc<dyn ReportSink>,
    config: PipelineConfig,
}

impl IngestPipeline {
    /// Create a pipeline over the given registry and reporting sink
    pub fn new(
        registry: Arc<LedgerRegistry>,
        sink: Arc<dyn ReportSink>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            registry,
            sink,
            config,
        }
    }

    /// Run the pipeline to completion over the source at `input`
    ///
    /// Builds a multi-threaded tokio runtime and drives [`Self::ingest`]
    /// on it. Intended for synchronous callers such as the CLI binary;
    /// async callers should use [`Self::ingest`] directly.
    ///
    /// # Errors
    ///
    /// Fatal errors only: runtime construction, source open, source read.
    /// Per-line and per-report failures are logged and reflected in the
    /// returned summary, never in the error.
    pub fn run(&self, input: &Path) -> Result<IngestSummary, IngestError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(num_cpus::get())
            .enable_time()
            .build()
            .map_err(IngestError::Runtime)?;

        runtime.block_on(self.ingest(input))
    }

    /// Ingest the source at `input` on the current runtime
    ///
    /// Phases:
    /// 1. open the source (failure is fatal) and spawn the reporter
    /// 2. repeat: read a bounded batch, apply each record strictly in
    ///    source order, submit a snapshot report job per applied record
    /// 3. on end of input, drain the reporter within the grace period
    ///
    /// A mid-run read error is fatal, but reports already queued for
    /// applied records are still granted the drain grace period before the
    /// error is returned.
    pub async fn ingest(&self, input: &Path) -> Result<IngestSummary, IngestError> {
        let file = tokio::fs::File::open(input)
            .await
            .map_err(|source| IngestError::Open {
                path: input.display().to_string(),
                source,
            })?;
        let source = TransactionSource::new(file).await?;

        self.ingest_source(source).await
    }

    async fn ingest_source<R>(
        &self,
        mut source: TransactionSource<R>,
    ) -> Result<IngestSummary, IngestError>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        let reporter = Reporter::spawn(Arc::clone(&self.sink), self.config.report_workers);
        let mut applied: u64 = 0;
        let mut read_error = None;

        loop {
            let batch = match source.read_batch(self.config.batch_size).await {
                Ok(batch) if batch.is_empty() => break,
                Ok(batch) => batch,
                // Fatal, but the drain below still covers the reports
                // queued for records applied in earlier batches
                Err(e) => {
                    read_error = Some(e);
                    break;
                }
            };

            for record in batch {
                let balance =
                    self.registry
                        .apply_transaction(record.account, record.action, record.amount);
                applied += 1;

                // Snapshot taken here, after the apply: a later concurrent
                // apply cannot change what this job reports.
                reporter.submit(ReportJob {
                    account: record.account,
                    timestamp: SystemTime::now(),
                    amount: record.amount,
                    balance,
                });
            }
        }

        let drained = reporter.drain(self.config.drain_timeout).await;
        if !drained {
            warn!("reporting backlog not fully drained within grace period");
        }

        if let Some(e) = read_error {
            return Err(e.into());
        }

        let summary = IngestSummary {
            applied,
            rejected: source.rejected(),
            drained,
        };
        info!(
            "ingestion finished: {} applied, {} rejected, {} accounts",
            summary.applied,
            summary.rejected,
            self.registry.len()
        );

        Ok(summary)
    }
}

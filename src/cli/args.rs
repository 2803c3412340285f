use crate::pipeline::PipelineConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Ingest account transactions and mirror them to a reporting sink
#[derive(Parser, Debug)]
#[command(name = "ledger-ingest")]
#[command(about = "Ingest account transactions into per-account ledgers", long_about = None)]
pub struct CliArgs {
    /// Input transaction file path
    #[arg(value_name = "INPUT", help = "Path to the transaction file")]
    pub input_file: PathBuf,

    /// Number of records applied per read cycle
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Records accumulated per batch before applying (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of background reporting workers
    #[arg(
        long = "report-workers",
        value_name = "COUNT",
        help = "Reporting workers; more than one relaxes report delivery order (default: 1)"
    )]
    pub report_workers: Option<usize>,

    /// Shutdown grace period for the reporting backlog, in seconds
    #[arg(
        long = "drain-timeout",
        value_name = "SECONDS",
        help = "Grace period for outstanding reports on shutdown (default: 60)"
    )]
    pub drain_timeout: Option<u64>,
}

impl CliArgs {
    /// Create a PipelineConfig from CLI arguments
    ///
    /// Uses the provided values where given and falls back to the pipeline
    /// defaults otherwise. Zero-value fallbacks are handled (and warned
    /// about) by `PipelineConfig::new`.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig::new(
            self.batch_size.unwrap_or(default.batch_size),
            self.report_workers.unwrap_or(default.report_workers),
            self.drain_timeout
                .map(Duration::from_secs)
                .unwrap_or(default.drain_timeout),
        )
    }
}

//! Background reporting workers with bounded-time drain
//!
//! This module decouples reporting from ingestion: applied transactions are
//! handed to an unbounded channel and delivered to the sink by background
//! tokio tasks the `Reporter` owns.
//!
//! # Design
//!
//! - `submit` never blocks and never fails ingestion; the backlog is
//!   unbounded so that reporting cannot throttle the apply path
//! - workers share one receiver behind an async mutex; a worker holds the
//!   lock only while waiting for the next job, not while delivering, so
//!   multiple workers deliver concurrently
//! - the sink contract is synchronous, so each delivery runs on tokio's
//!   blocking pool; a stalled sink occupies a blocking thread, never a
//!   runtime worker, and the time driver stays live
//! - `drain` closes the channel and waits for the workers up to a deadline;
//!   past the deadline a cancellation signal stops each worker between
//!   jobs and the jobs still queued are dropped (reporting is best-effort)
//!
//! # Ordering
//!
//! With one worker (the default), jobs reach the sink in submission order.
//! With more than one, delivery order across jobs is unspecified.

use crate::pipeline::sink::ReportSink;
use crate::types::ReportJob;
use log::{error, trace, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;

/// Handle to the reporting channel and its worker tasks
///
/// Owned by the pipeline for the duration of a run; consumed by
/// [`Reporter::drain`] during shutdown.
pub struct Reporter {
    tx: mpsc::UnboundedSender<ReportJob>,
    cancel: watch::Sender<bool>,
    workers: Vec<JoinHandle<()>>,
}

impl Reporter {
    /// Spawn the reporting channel and `workers` background tasks
    ///
    /// Each worker dequeues jobs and invokes the sink on the blocking pool.
    /// A sink failure for one job is logged and does not terminate the
    /// worker. A `workers` value of 0 is treated as 1.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(sink: Arc<dyn ReportSink>, workers: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<ReportJob>();
        let rx = Arc::new(Mutex::new(rx));
        let (cancel, _) = watch::channel(false);

        let workers = (0..workers.max(1))
            .map(|worker| {
                let sink = Arc::clone(&sink);
                let rx = Arc::clone(&rx);
                let mut cancel_rx = cancel.subscribe();
                tokio::spawn(async move {
                    loop {
                        // Hold the receiver lock only while waiting for a
                        // job; release it before delivery so other workers
                        // can keep dequeuing. Cancellation lands here,
                        // between jobs.
                        let job = {
                            let mut queue = rx.lock().await;
                            tokio::select! {
                                job = queue.recv() => job,
                                _ = cancel_rx.changed() => None,
                            }
                        };
                        let Some(job) = job else { break };

                        // The sink call blocks; keep it off the runtime
                        // workers so timers and other tasks stay live.
                        let sink = Arc::clone(&sink);
                        let delivery =
                            tokio::task::spawn_blocking(move || (sink.report(&job), job));
                        match delivery.await {
                            Ok((Ok(()), _)) => {}
                            Ok((Err(e), job)) => {
                                warn!("report for account {} failed: {}", job.account, e)
                            }
                            Err(e) => error!("report delivery task failed: {}", e),
                        }
                    }
                    trace!("reporting worker {} finished", worker);
                })
            })
            .collect();

        Reporter {
            tx,
            cancel,
            workers,
        }
    }

    /// Enqueue one report job without blocking
    ///
    /// Never fails the caller: if the channel is somehow closed the job is
    /// dropped with a logged warning.
    pub fn submit(&self, job: ReportJob) {
        if self.tx.send(job).is_err() {
            warn!("reporting channel closed, dropping report job");
        }
    }

    /// Close the channel and wait for the backlog, up to `grace`
    ///
    /// Already-enqueued jobs are allowed to finish within the grace period.
    /// Once the deadline elapses, remaining workers are cancelled and jobs
    /// still queued are dropped; this is logged as a warning, never an
    /// error to the caller. A delivery already in flight on the blocking
    /// pool runs to completion; nothing further is dequeued.
    ///
    /// # Returns
    ///
    /// `true` if every worker finished the backlog inside the grace period.
    pub async fn drain(self, grace: Duration) -> bool {
        let Reporter {
            tx,
            cancel,
            workers,
        } = self;

        // Closing the channel lets workers exit once the backlog is empty
        drop(tx);

        let deadline = tokio::time::Instant::now() + grace;
        let mut drained = true;

        for mut handle in workers {
            match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("reporting worker panicked: {}", e),
                Err(_) => {
                    // Deadline elapsed: signal the worker to stop between
                    // jobs, then cut the join await.
                    let _ = cancel.send(true);
                    handle.abort();
                    warn!("drain grace period elapsed, cancelling reporting worker");
                    drained = false;
                }
            }
        }

        drained
    }
}

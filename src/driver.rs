//! Driver spawns and manages the audit task
//!
//! The audit task owns the [`TrafficAnalyzer`] and a [`FindingSink`]
//! exclusively, so frames are evaluated strictly in channel-arrival order
//! with no shared mutable state - the history invariants hold without any
//! locking. One [`FrameReport`] is forwarded per successfully decoded
//! frame over a bounded channel; findings also go to the sink.

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::analyzer::{FrameReport, TrafficAnalyzer};
use crate::sink::{FindingSink, TracingSink};
use crate::source::FrameSource;

/// Capacity of the report channel; the task awaits when consumers lag.
const REPORT_CAPACITY: usize = 64;

/// Consecutive source errors tolerated before the task gives up.
const MAX_SOURCE_ERRORS: u32 = 10;

/// Handles to a running audit task.
pub struct AuditChannels {
    /// Receiver of per-frame reports. The channel closing signals end of
    /// stream.
    pub reports: mpsc::Receiver<FrameReport>,
    /// Cancellation token for graceful shutdown. Dropping the receiver
    /// also stops the task at its next report.
    pub cancel: CancellationToken,
}

impl AuditChannels {
    /// Adapt the report receiver into a `futures::Stream`.
    ///
    /// The stream ends when the source does; cancelling beforehand is
    /// still possible through a clone of [`cancel`](Self::cancel).
    pub fn into_stream(self) -> impl futures::Stream<Item = FrameReport> + Send + 'static {
        ReceiverStream::new(self.reports)
    }
}

/// Driver spawns and manages the audit task.
pub struct Driver;

impl Driver {
    /// Spawn the audit task for the given source, logging findings.
    ///
    /// Must be called within a Tokio runtime. Findings are logged through
    /// [`TracingSink`]; use [`spawn_with`](Self::spawn_with) to collect or
    /// route them elsewhere.
    pub fn spawn<F>(source: F) -> AuditChannels
    where
        F: FrameSource,
    {
        Self::spawn_with(source, TracingSink)
    }

    /// Spawn the audit task with a caller-supplied finding sink.
    pub fn spawn_with<F, S>(source: F, sink: S) -> AuditChannels
    where
        F: FrameSource,
        S: FindingSink,
    {
        let (report_tx, report_rx) = mpsc::channel(REPORT_CAPACITY);
        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        tokio::spawn(async move {
            Self::audit_task(source, sink, report_tx, cancel_task).await;
        });

        AuditChannels { reports: report_rx, cancel }
    }

    /// Audit task - pulls frames, analyzes them, forwards reports.
    async fn audit_task<F, S>(
        mut source: F,
        mut sink: S,
        report_tx: mpsc::Sender<FrameReport>,
        cancel: CancellationToken,
    ) where
        F: FrameSource,
        S: FindingSink,
    {
        debug!("Audit task started");
        let mut analyzer = TrafficAnalyzer::new();
        let mut error_streak = 0u32;

        loop {
            // Allow cancellation while waiting on the source.
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Audit task cancelled");
                    break;
                }
                result = source.next_frame() => result,
            };

            match result {
                Ok(Some(raw)) => {
                    error_streak = 0;

                    let report = match analyzer.process_tagged(&raw.payload, raw.signature) {
                        Ok(report) => report,
                        Err(e) if e.is_frame_local() => {
                            // Already counted and logged by the analyzer.
                            continue;
                        }
                        Err(e) => {
                            warn!("Frame processing failed: {e}");
                            continue;
                        }
                    };

                    for finding in &report.findings {
                        sink.record(&report.frame, finding);
                    }

                    let sent = tokio::select! {
                        _ = cancel.cancelled() => {
                            info!("Audit task cancelled while forwarding");
                            break;
                        }
                        sent = report_tx.send(report) => sent,
                    };
                    if sent.is_err() {
                        debug!("Report receiver dropped, shutting down");
                        break;
                    }
                }
                Ok(None) => {
                    info!("Frame source ended");
                    break;
                }
                Err(e) => {
                    // Source error - don't crash on transient failures.
                    error_streak += 1;
                    error!("Source error ({}/{}): {}", error_streak, MAX_SOURCE_ERRORS, e);

                    if error_streak >= MAX_SOURCE_ERRORS {
                        error!("Too many source errors, shutting down");
                        break;
                    }

                    // Exponential backoff: 100ms, 200ms, 400ms, ...
                    let backoff =
                        std::time::Duration::from_millis(50 * (1 << error_streak.min(5)));
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        let stats = analyzer.stats();
        info!(
            frames = stats.frames_processed,
            decode_failures = stats.decode_failures,
            findings = stats.findings_total,
            "Audit task ended"
        );
    }
}

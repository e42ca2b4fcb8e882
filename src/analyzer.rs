//! Traffic analyzer tying decoding to anomaly detection
//!
//! [`TrafficAnalyzer`] is the decode-then-evaluate pipeline over one
//! ordered frame stream: each raw payload is decoded, evaluated against the
//! device history, and summarized as a [`FrameReport`]. Session counters
//! are tracked in [`AuditStats`] so a run can report totals at the end.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::detector::AnomalyDetector;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::phy;
use crate::types::{DecodedFrame, Finding, FindingKind, FrameSignature};

/// Per-frame outcome handed to sinks and channel consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    /// The decoded frame.
    pub frame: DecodedFrame,
    /// All findings the frame triggered, in check order.
    pub findings: Vec<Finding>,
}

impl FrameReport {
    /// Whether the frame triggered any finding.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Session counters, snapshotted with [`TrafficAnalyzer::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStats {
    /// Frames decoded and evaluated.
    pub frames_processed: u64,
    /// Raw payloads rejected by the decoder.
    pub decode_failures: u64,
    /// All findings emitted, including replay checks.
    pub findings_total: u64,
    pub counter_resets: u64,
    pub bursts: u64,
    pub replays: u64,
}

/// Stateful decode-and-evaluate pipeline over one frame stream.
#[derive(Debug, Default)]
pub struct TrafficAnalyzer {
    detector: AnomalyDetector,
    stats: AuditStats,
}

impl TrafficAnalyzer {
    /// Create an analyzer with an unbounded history store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer over a pre-configured history store.
    pub fn with_store(store: HistoryStore) -> Self {
        TrafficAnalyzer { detector: AnomalyDetector::with_store(store), stats: AuditStats::default() }
    }

    /// Decode a raw payload and evaluate it against the device history.
    ///
    /// Decode failures are counted and surfaced to the caller; the expected
    /// policy is to skip the frame and continue. Equivalent to
    /// [`process_tagged`](Self::process_tagged) with no signature.
    pub fn process(&mut self, raw: &[u8]) -> Result<FrameReport> {
        self.process_tagged(raw, None)
    }

    /// Decode and evaluate a raw payload, storing a provider-supplied
    /// replay signature with its history entry.
    pub fn process_tagged(
        &mut self,
        raw: &[u8],
        signature: Option<FrameSignature>,
    ) -> Result<FrameReport> {
        let frame = phy::decode(raw).inspect_err(|e| {
            self.stats.decode_failures += 1;
            warn!("Undecodable frame: {e}");
        })?;
        self.stats.frames_processed += 1;

        let evaluation = self.detector.evaluate_tagged(&frame, signature);
        for finding in &evaluation.findings {
            self.count(finding.kind());
        }

        trace!(
            message_type = %frame.message_type,
            findings = evaluation.findings.len(),
            "Frame evaluated"
        );

        Ok(FrameReport { frame, findings: evaluation.findings })
    }

    /// Check a caller-supplied signature against stored history.
    ///
    /// Independent entry point mirroring
    /// [`AnomalyDetector::check_replay`]: frame processing never runs it.
    pub fn check_replay(&mut self, signature: &FrameSignature) -> Option<Finding> {
        let finding = self.detector.check_replay(signature)?;
        self.count(FindingKind::ReplayAttack);
        Some(finding)
    }

    /// Snapshot the session counters.
    pub fn stats(&self) -> AuditStats {
        self.stats
    }

    /// Read access to the underlying history store.
    pub fn store(&self) -> &HistoryStore {
        self.detector.store()
    }

    fn count(&mut self, kind: FindingKind) {
        self.stats.findings_total += 1;
        match kind {
            FindingKind::CounterReset => self.stats.counter_resets += 1,
            FindingKind::AbnormalBurst => self.stats.bursts += 1,
            FindingKind::ReplayAttack => self.stats.replays += 1,
        }
    }
}

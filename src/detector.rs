//! Protocol anomaly detection over the device history
//!
//! The detector consumes decoded data frames one at a time and evaluates
//! each against the history of what came before. Two checks run on every
//! data frame, in fixed order:
//!
//! 1. **Counter reset** - the device's frame counter moved strictly
//!    backward compared to its own previous entry (a tie is not a reset)
//! 2. **Burst rate** - a single device owns strictly more than
//!    [`BURST_DEVICE_THRESHOLD`] of the last [`BURST_WINDOW`] stored
//!    entries
//!
//! Both checks read the store as of before the current frame is appended;
//! the frame's own entry lands after the checks. The checks are
//! independent, so one frame can produce zero, one, or both findings.
//!
//! The replay check is deliberately not part of frame evaluation: it needs
//! an externally computed signature and is exposed as the separate
//! [`AnomalyDetector::check_replay`] entry point.

use std::collections::HashMap;

use crate::history::{HistoryEntry, HistoryStore};
use crate::types::{DecodedFrame, DeviceAddress, Finding, FrameSignature};

/// Number of most recent entries the burst check inspects.
pub const BURST_WINDOW: usize = 10;

/// A device owning strictly more than this many window entries is bursting.
///
/// The 8-of-10 exclusive threshold is a fixed policy constant of the
/// detector contract, not configuration.
pub const BURST_DEVICE_THRESHOLD: usize = 8;

/// Outcome of evaluating one decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// All findings the frame triggered, in check order.
    pub findings: Vec<Finding>,
    /// The entry appended to the history, absent for non-data frames.
    pub entry: Option<HistoryEntry>,
}

/// Stateful per-device anomaly detector.
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    store: HistoryStore,
}

impl AnomalyDetector {
    /// Create a detector with an unbounded history store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector over a pre-configured store.
    pub fn with_store(store: HistoryStore) -> Self {
        AnomalyDetector { store }
    }

    /// Read access to the underlying history store.
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Evaluate a decoded frame against the history and record it.
    ///
    /// Join and reserved-type frames pass through: no findings, no entry.
    /// Equivalent to [`evaluate_tagged`](Self::evaluate_tagged) with no
    /// signature.
    pub fn evaluate(&mut self, frame: &DecodedFrame) -> Evaluation {
        self.evaluate_tagged(frame, None)
    }

    /// Evaluate a decoded frame, storing a provider-supplied signature
    /// with its history entry.
    ///
    /// The signature is retained for later [`check_replay`](Self::check_replay)
    /// calls; evaluation itself never runs the replay check.
    pub fn evaluate_tagged(
        &mut self,
        frame: &DecodedFrame,
        signature: Option<FrameSignature>,
    ) -> Evaluation {
        let Some(data) = frame.data else {
            return Evaluation { findings: Vec::new(), entry: None };
        };

        let mut findings = Vec::new();

        // Counter reset: strictly backward against this device's last entry.
        if let Some(last) = self.store.latest_for(data.device_address) {
            if data.frame_counter < last.frame_counter {
                findings.push(Finding::CounterReset {
                    device_address: data.device_address,
                    previous: last.frame_counter,
                    observed: data.frame_counter,
                });
            }
        }

        // Burst rate: the gate counts the frame under evaluation, the
        // window does not include it.
        if self.store.total_appended() >= BURST_WINDOW as u64 {
            if let Some(finding) = self.burst_finding() {
                findings.push(finding);
            }
        }

        let entry = HistoryEntry {
            device_address: data.device_address,
            frame_counter: data.frame_counter,
            message_type: frame.message_type,
            signature,
        };
        self.store.append(entry.clone());

        Evaluation { findings, entry: Some(entry) }
    }

    /// Check a caller-supplied signature against stored history.
    ///
    /// Independent entry point: evaluation never runs this check, and
    /// running it never appends anything. Returns the replay finding when
    /// the exact signature was stored by an earlier evaluation.
    pub fn check_replay(&self, signature: &FrameSignature) -> Option<Finding> {
        if self.store.signature_seen(signature) {
            Some(Finding::ReplayAttack { signature: signature.clone() })
        } else {
            None
        }
    }

    fn burst_finding(&self) -> Option<Finding> {
        let mut counts: HashMap<DeviceAddress, usize> = HashMap::new();
        for entry in self.store.recent_window(BURST_WINDOW) {
            *counts.entry(entry.device_address).or_default() += 1;
        }

        // At most one device can exceed the threshold in a single window.
        counts.into_iter().find(|(_, count)| *count > BURST_DEVICE_THRESHOLD).map(
            |(device_address, count_in_window)| Finding::AbnormalBurst {
                device_address,
                window_size: BURST_WINDOW,
                count_in_window,
            },
        )
    }
}

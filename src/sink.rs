//! Finding sinks
//!
//! The pipeline has no opinion on what happens to a finding once emitted;
//! sinks are the seam where a report view, an alert pipeline, or a test
//! harness plugs in.

use std::collections::HashMap;

use tracing::{error, warn};

use crate::types::{DecodedFrame, Finding, FindingKind, Severity};

/// Consumer of emitted findings.
///
/// Called once per finding with the frame that triggered it. Sinks run
/// inside the audit task, so implementations should stay cheap and must
/// not block.
pub trait FindingSink: Send + 'static {
    fn record(&mut self, frame: &DecodedFrame, finding: &Finding);
}

/// Sink that keeps every finding in memory, with per-kind counts.
#[derive(Debug, Default)]
pub struct CollectingSink {
    findings: Vec<Finding>,
    by_kind: HashMap<FindingKind, usize>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded findings, in arrival order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// How many findings of one kind have been recorded.
    pub fn count_of(&self, kind: FindingKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Consume the sink, keeping the recorded findings.
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

impl FindingSink for CollectingSink {
    fn record(&mut self, _frame: &DecodedFrame, finding: &Finding) {
        *self.by_kind.entry(finding.kind()).or_default() += 1;
        self.findings.push(finding.clone());
    }
}

/// Sink that logs each finding at a severity-mapped level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl FindingSink for TracingSink {
    fn record(&mut self, frame: &DecodedFrame, finding: &Finding) {
        match finding.severity() {
            Severity::Warning => {
                warn!(message_type = %frame.message_type, kind = finding.kind().as_str(), "{finding}");
            }
            Severity::Critical => {
                error!(message_type = %frame.message_type, kind = finding.kind().as_str(), "{finding}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceAddress;

    fn dummy_frame() -> DecodedFrame {
        DecodedFrame {
            message_type: crate::types::MessageType::UnconfirmedDataUp,
            mhdr: 0x40,
            data: None,
        }
    }

    #[test]
    fn collecting_sink_keeps_order_and_counts() {
        let mut sink = CollectingSink::new();
        assert!(sink.is_empty());

        let reset = Finding::CounterReset {
            device_address: DeviceAddress(1),
            previous: 9,
            observed: 0,
        };
        let burst = Finding::AbnormalBurst {
            device_address: DeviceAddress(1),
            window_size: 10,
            count_in_window: 9,
        };
        let frame = dummy_frame();

        sink.record(&frame, &reset);
        sink.record(&frame, &burst);
        sink.record(&frame, &reset);

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.count_of(FindingKind::CounterReset), 2);
        assert_eq!(sink.count_of(FindingKind::AbnormalBurst), 1);
        assert_eq!(sink.count_of(FindingKind::ReplayAttack), 0);
        assert_eq!(sink.findings()[0], reset);
        assert_eq!(sink.into_findings(), vec![reset.clone(), burst, reset]);
    }
}

//! Anomaly findings emitted by the detector

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DeviceAddress, FrameSignature};

/// Severity of a finding.
///
/// Counter resets and bursts are warnings (a reboot, a chatty sensor, or an
/// attack); a replayed signature is always hostile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

/// Discrete finding categories, useful for counting and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    CounterReset,
    AbnormalBurst,
    ReplayAttack,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::CounterReset => "frame counter reset",
            FindingKind::AbnormalBurst => "abnormal burst rate",
            FindingKind::ReplayAttack => "replay attack",
        }
    }
}

/// One detected protocol anomaly.
///
/// Findings are immutable values: they copy the triggering fields rather
/// than referencing live history state, so they can outlive the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Finding {
    /// A device's frame counter moved backward.
    CounterReset {
        device_address: DeviceAddress,
        previous: u16,
        observed: u16,
    },
    /// One device saturated the recent transmission window.
    AbnormalBurst {
        device_address: DeviceAddress,
        window_size: usize,
        count_in_window: usize,
    },
    /// A previously stored signature was observed again.
    ReplayAttack { signature: FrameSignature },
}

impl Finding {
    pub fn kind(&self) -> FindingKind {
        match self {
            Finding::CounterReset { .. } => FindingKind::CounterReset,
            Finding::AbnormalBurst { .. } => FindingKind::AbnormalBurst,
            Finding::ReplayAttack { .. } => FindingKind::ReplayAttack,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Finding::CounterReset { .. } => Severity::Warning,
            Finding::AbnormalBurst { .. } => Severity::Warning,
            Finding::ReplayAttack { .. } => Severity::Critical,
        }
    }

    /// The device the finding points at, when it names one.
    pub fn device_address(&self) -> Option<DeviceAddress> {
        match self {
            Finding::CounterReset { device_address, .. } => Some(*device_address),
            Finding::AbnormalBurst { device_address, .. } => Some(*device_address),
            Finding::ReplayAttack { .. } => None,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::CounterReset { device_address, previous, observed } => {
                write!(f, "frame counter reset on {device_address}: {previous} -> {observed}")
            }
            Finding::AbnormalBurst { device_address, window_size, count_in_window } => {
                write!(
                    f,
                    "abnormal transmission rate from {device_address}: \
                     {count_in_window} of last {window_size} frames"
                )
            }
            Finding::ReplayAttack { signature } => {
                write!(f, "possible replay attack: signature {signature} seen before")
            }
        }
    }
}

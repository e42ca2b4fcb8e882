//! Device history store backing the anomaly checks
//!
//! Keeps the arrival-ordered log of observed data frames plus the read
//! views the detector needs: the most recent entry per device, the recent
//! cross-device window, and the set of stored replay signatures.
//!
//! ## Usage Example
//!
//! ```rust
//! use chirpwatch::history::{HistoryEntry, HistoryStore};
//! use chirpwatch::types::{DeviceAddress, MessageType};
//!
//! let mut store = HistoryStore::new();
//! store.append(HistoryEntry {
//!     device_address: DeviceAddress(0x26BF7AF1),
//!     frame_counter: 7,
//!     message_type: MessageType::UnconfirmedDataUp,
//!     signature: None,
//! });
//!
//! let last = store.latest_for(DeviceAddress(0x26BF7AF1)).expect("device was seen");
//! assert_eq!(last.frame_counter, 7);
//! ```
//!
//! ## Retention
//!
//! The default store keeps the full log. A store built with
//! [`HistoryStore::with_retention`] evicts the oldest log entries past the
//! cap, but the per-device latest entry and the signature set survive
//! eviction, so reset and replay checks see the same answers either way.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::detector::BURST_WINDOW;
use crate::types::{DeviceAddress, FrameSignature, MessageType};

/// One record of a successfully evaluated data frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub device_address: DeviceAddress,
    pub frame_counter: u16,
    pub message_type: MessageType,
    /// Replay-matching token, when a signature provider supplied one.
    pub signature: Option<FrameSignature>,
}

/// Arrival-ordered log of observed data frames.
///
/// Ordering is the anomaly semantics: the reset and burst checks are
/// defined over "what came before", so entries are only ever appended and
/// the log is never reordered.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    log: VecDeque<HistoryEntry>,
    retain: Option<usize>,
    latest: HashMap<DeviceAddress, HistoryEntry>,
    signatures: HashSet<FrameSignature>,
    appended: u64,
}

impl HistoryStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that retains at most `cap` log entries.
    ///
    /// A cap below the burst window would blind the burst check, so the
    /// cap is clamped to at least [`BURST_WINDOW`].
    pub fn with_retention(cap: usize) -> Self {
        HistoryStore { retain: Some(cap.max(BURST_WINDOW)), ..Self::default() }
    }

    /// Append an entry to the end of the log.
    ///
    /// O(1) amortized; never fails. Evicts the oldest log entries when a
    /// retention cap is set.
    pub fn append(&mut self, entry: HistoryEntry) {
        if let Some(signature) = &entry.signature {
            self.signatures.insert(signature.clone());
        }
        self.latest.insert(entry.device_address, entry.clone());
        self.log.push_back(entry);
        self.appended += 1;

        if let Some(cap) = self.retain {
            while self.log.len() > cap {
                self.log.pop_front();
            }
        }
    }

    /// The most recently appended entry for a device, if it was ever seen.
    pub fn latest_for(&self, device: DeviceAddress) -> Option<&HistoryEntry> {
        self.latest.get(&device)
    }

    /// The last `n` entries across all devices, oldest first.
    ///
    /// Returns fewer than `n` entries when fewer have been retained.
    pub fn recent_window(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.log.iter().skip(self.log.len().saturating_sub(n))
    }

    /// Whether any stored entry carries exactly this signature.
    pub fn signature_seen(&self, signature: &FrameSignature) -> bool {
        self.signatures.contains(signature)
    }

    /// Number of entries currently retained in the log.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// True when no entry has been retained.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Total entries ever appended, unaffected by retention eviction.
    pub fn total_appended(&self) -> u64 {
        self.appended
    }

    /// Number of distinct devices observed.
    pub fn device_count(&self) -> usize {
        self.latest.len()
    }
}

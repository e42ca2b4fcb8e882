//! LoRaWAN frame analysis and protocol anomaly detection.
//!
//! Chirpwatch decodes the fixed-format MAC header of LoRaWAN PHY payloads
//! and tracks per-device frame-counter sequences and replayed signatures
//! over time to flag protocol-level security anomalies.
//!
//! # Features
//!
//! - **Frame decoding**: bit-exact MHDR/DevAddr/FCtrl/FCnt extraction with
//!   typed errors for malformed payloads
//! - **Anomaly detection**: counter resets, abnormal transmission bursts,
//!   and replayed frame signatures over a rolling history
//! - **Capture replay**: feed recorded captures through the full pipeline
//!   with optional pacing
//! - **Async ingestion**: a driver task owns the analyzer and forwards
//!   per-frame reports over channels
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chirpwatch::Chirpwatch;
//!
//! #[tokio::main]
//! async fn main() -> chirpwatch::Result<()> {
//!     let mut channels = Chirpwatch::replay("capture.txt")?;
//!
//!     while let Some(report) = channels.reports.recv().await {
//!         for finding in &report.findings {
//!             println!("[{}] {finding}", finding.severity().as_str());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The synchronous core is usable on its own when no async plumbing is
//! wanted:
//!
//! ```rust
//! use chirpwatch::TrafficAnalyzer;
//!
//! let mut analyzer = TrafficAnalyzer::new();
//! let raw = [0x40, 0xF1, 0x7A, 0xBF, 0x26, 0x00, 0x00, 0x00];
//! let report = analyzer.process(&raw)?;
//! assert!(report.is_clean());
//! # Ok::<(), chirpwatch::AnalysisError>(())
//! ```

// Core types and error handling
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Synchronous analysis core
pub mod analyzer;
pub mod detector;
pub mod history;
pub mod phy;

// Stream-based ingestion architecture
pub mod driver;
pub mod sink;
pub mod source;
pub mod sources;

// Core exports
pub use analyzer::{AuditStats, FrameReport, TrafficAnalyzer};
pub use detector::{AnomalyDetector, BURST_DEVICE_THRESHOLD, BURST_WINDOW, Evaluation};
pub use error::{AnalysisError, Result};
pub use history::{HistoryEntry, HistoryStore};
pub use types::*;

// Ingestion exports
pub use driver::{AuditChannels, Driver};
pub use sink::{CollectingSink, FindingSink, TracingSink};
pub use source::{FrameSource, RawFrame};
pub use sources::ReplaySource;

/// Unified entry point for chirpwatch audit pipelines.
///
/// # Example
///
/// ```rust,no_run
/// use chirpwatch::Chirpwatch;
///
/// #[tokio::main]
/// async fn main() -> chirpwatch::Result<()> {
///     let mut channels = Chirpwatch::replay("test-data/captures/counter_reset.txt")?;
///     while let Some(report) = channels.reports.recv().await {
///         println!("{}: {} findings", report.frame.message_type, report.findings.len());
///     }
///     Ok(())
/// }
/// ```
pub struct Chirpwatch;

impl Chirpwatch {
    /// Replay a recorded capture file through the audit pipeline.
    ///
    /// Loads and validates the whole capture eagerly, then spawns the
    /// audit task. Must be called within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains malformed
    /// capture lines.
    pub fn replay<P: AsRef<std::path::Path>>(path: P) -> Result<AuditChannels> {
        let source = ReplaySource::open(path)?;
        Ok(Driver::spawn(source))
    }
}

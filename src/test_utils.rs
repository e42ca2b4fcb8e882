//! Test utilities for fixture resolution and frame construction
//!
//! This module provides helpers for locating committed capture fixtures and
//! building frame bytes, shared by unit tests, integration tests, and
//! benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use std::path::{Path, PathBuf};

/// Guidance shown when capture fixtures are missing from the checkout.
pub const FIXTURE_GUIDANCE: &str =
    "Capture fixtures are committed under test-data/captures/; a missing file usually means an incomplete checkout.";

/// Error returned when a required capture fixture cannot be located.
#[derive(Debug, Clone)]
pub struct FixtureError {
    message: String,
}

impl FixtureError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FixtureError {}

/// The committed capture fixture directory, resolved from the crate root
/// so tests work regardless of the working directory.
pub fn capture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data").join("captures")
}

/// Require a named capture fixture and return its path.
pub fn require_capture_fixture(file_name: &str) -> Result<PathBuf, FixtureError> {
    let path = capture_dir().join(file_name);
    if path.exists() {
        Ok(path)
    } else {
        Err(FixtureError::new(format!(
            "Missing capture fixture: {}. {}",
            path.display(),
            FIXTURE_GUIDANCE
        )))
    }
}

/// Build the wire bytes of a data frame header from its fields.
///
/// The MHDR is taken as-is; DevAddr and FCnt are emitted little-endian per
/// the PHY layout.
pub fn data_frame_bytes(mhdr: u8, device_address: u32, fctrl: u8, frame_counter: u16) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(crate::phy::DATA_HEADER_LEN);
    bytes.push(mhdr);
    bytes.extend_from_slice(&device_address.to_le_bytes());
    bytes.push(fctrl);
    bytes.extend_from_slice(&frame_counter.to_le_bytes());
    bytes
}

/// Build an unconfirmed uplink (MHDR `0x40`) with no control flags.
pub fn uplink(device_address: u32, frame_counter: u16) -> Vec<u8> {
    data_frame_bytes(0x40, device_address, 0x00, frame_counter)
}

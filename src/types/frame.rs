//! Decoded frame representation

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CtrlFlags, MessageType};

/// 32-bit LoRaWAN short device address.
///
/// Assigned per session by the network server and transmitted little-endian
/// on the wire. Displays in the conventional `0x%08X` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceAddress(pub u32);

impl DeviceAddress {
    /// Build an address from its wire representation (little-endian).
    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        DeviceAddress(u32::from_le_bytes(bytes))
    }

    /// The wire representation of this address (little-endian).
    pub fn to_le_bytes(&self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Get the raw u32 value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for DeviceAddress {
    fn from(value: u32) -> Self {
        DeviceAddress(value)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// Addressing and link-control fields carried only by data frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFields {
    pub device_address: DeviceAddress,
    pub ctrl: CtrlFlags,
    pub frame_counter: u16,
}

/// Immutable decoded view of one PHY payload header.
///
/// The DevAddr/FCtrl/FCnt triple exists exactly when `message_type` is one
/// of the four data variants, so the three fields live behind a single
/// `Option` and partial presence is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedFrame {
    pub message_type: MessageType,
    /// Raw MHDR byte, kept for diagnostics.
    pub mhdr: u8,
    /// Present exactly when `message_type.carries_device_address()`.
    pub data: Option<DataFields>,
}

impl DecodedFrame {
    /// Device address, when this is a data frame.
    pub fn device_address(&self) -> Option<DeviceAddress> {
        self.data.map(|d| d.device_address)
    }

    /// Frame counter, when this is a data frame.
    pub fn frame_counter(&self) -> Option<u16> {
        self.data.map(|d| d.frame_counter)
    }
}

//! Core types for LoRaWAN frame analysis.
//!
//! This module provides the value types flowing through the pipeline,
//! from decoded wire fields to emitted findings.
//!
//! ## Architecture
//!
//! - [`DecodedFrame`] is the immutable result of one decode call; its
//!   [`DataFields`] payload exists exactly for data-bearing message types
//! - [`MessageType`] maps the 3-bit MHDR MType field, with reserved values
//!   carried through as `Unknown`
//! - [`CtrlFlags`] decodes the upper nibble of the FCtrl byte
//! - [`DeviceAddress`] wraps the 32-bit little-endian DevAddr
//! - [`Finding`] is one detected anomaly, tagged with a [`FindingKind`]
//!   and a [`Severity`]
//! - [`FrameSignature`] is the opaque token used for replay matching
//!
//! ## Usage Example
//!
//! ```rust
//! use chirpwatch::phy;
//! use chirpwatch::types::{DeviceAddress, MessageType};
//!
//! // Unconfirmed uplink, DevAddr 0x26BF7AF1, FCnt 0
//! let raw = [0x40, 0xF1, 0x7A, 0xBF, 0x26, 0x00, 0x00, 0x00];
//! let frame = phy::decode(&raw).expect("valid data frame");
//!
//! assert_eq!(frame.message_type, MessageType::UnconfirmedDataUp);
//! let data = frame.data.expect("data frames carry addressing fields");
//! assert_eq!(data.device_address, DeviceAddress(0x26BF7AF1));
//! assert_eq!(data.frame_counter, 0);
//! assert!(data.ctrl.is_empty());
//! ```

mod ctrl_flags;
mod finding;
mod frame;
mod message_type;
mod signature;

// Re-export all public types
pub use ctrl_flags::CtrlFlags;
pub use finding::{Finding, FindingKind, Severity};
pub use frame::{DataFields, DecodedFrame, DeviceAddress};
pub use message_type::MessageType;
pub use signature::FrameSignature;

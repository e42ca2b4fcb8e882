//! LoRaWAN PHY payload structure and parsing
//!
//! Defines the fixed byte layout of the MAC header and addressing fields
//! and provides the decode/encode functions the rest of the crate builds on.
//!
//! ## PHY Payload Structure
//!
//! The decoder consumes the leading bytes of a LoRaWAN PHY payload:
//!
//! 1. **MHDR** (1 byte) - bits [7:5] carry the MType, bits [4:0] are
//!    reserved and passed through untouched
//! 2. **DevAddr** (4 bytes) - little-endian u32, data frames only
//! 3. **FCtrl** (1 byte) - bit7=ADR, bit6=ADRACKReq, bit5=ACK, bit4=FPending
//! 4. **FCnt** (2 bytes) - little-endian u16
//!
//! Join traffic (MType 0 and 1) and the reserved MTypes 6 and 7 stop after
//! the MHDR; only the four data MTypes (2 through 5) carry the addressing
//! fields. Anything after the 8-byte data header (FPort, FRMPayload, MIC)
//! is out of scope and ignored.
//!
//! ## Characteristics
//!
//! - Explicit little-endian byte order handling
//! - Bounds checking before every field read
//! - No validation of MIC or payload contents

use tracing::trace;

use crate::error::{AnalysisError, Result};
use crate::types::{CtrlFlags, DataFields, DecodedFrame, DeviceAddress, MessageType};

/// Size of the bare MAC header in bytes.
pub const MHDR_LEN: usize = 1;
/// Minimum payload length for a data frame: MHDR + DevAddr + FCtrl + FCnt.
pub const DATA_HEADER_LEN: usize = 8;

// Field offsets within a data frame header
const DEV_ADDR_OFFSET: usize = 1;
const FCTRL_OFFSET: usize = 5;
const FCNT_OFFSET: usize = 6;

/// Decode the MAC header fields of a raw PHY payload.
///
/// Pure function of the input bytes: at least 1 byte is required for the
/// MHDR, and 8 bytes when the MType declares a data frame. Trailing bytes
/// are ignored.
pub fn decode(raw: &[u8]) -> Result<DecodedFrame> {
    let mhdr = *raw.first().ok_or(AnalysisError::EmptyInput)?;
    let message_type = MessageType::from_mhdr(mhdr);

    if !message_type.carries_device_address() {
        trace!(message_type = %message_type, mhdr = format_args!("0x{mhdr:02X}"), "decoded frame");
        return Ok(DecodedFrame { message_type, mhdr, data: None });
    }

    if raw.len() < DATA_HEADER_LEN {
        return Err(AnalysisError::truncated(message_type, DATA_HEADER_LEN, raw.len()));
    }

    let device_address = DeviceAddress::from_le_bytes([
        raw[DEV_ADDR_OFFSET],
        raw[DEV_ADDR_OFFSET + 1],
        raw[DEV_ADDR_OFFSET + 2],
        raw[DEV_ADDR_OFFSET + 3],
    ]);
    let ctrl = CtrlFlags::from_bits(raw[FCTRL_OFFSET]);
    let frame_counter = u16::from_le_bytes([raw[FCNT_OFFSET], raw[FCNT_OFFSET + 1]]);

    trace!(
        message_type = %message_type,
        mhdr = format_args!("0x{mhdr:02X}"),
        device_address = %device_address,
        frame_counter,
        "decoded data frame"
    );

    Ok(DecodedFrame {
        message_type,
        mhdr,
        data: Some(DataFields { device_address, ctrl, frame_counter }),
    })
}

/// Serialize a decoded frame's fields back into the wire layout.
///
/// Produces 1 byte for non-data frames and 8 bytes for data frames. The
/// FCtrl low nibble (FOptsLen) is emitted as zero since it is not modeled.
pub fn encode(frame: &DecodedFrame) -> Vec<u8> {
    match frame.data {
        Some(data) => {
            let mut bytes = Vec::with_capacity(DATA_HEADER_LEN);
            bytes.push(frame.mhdr);
            bytes.extend_from_slice(&data.device_address.to_le_bytes());
            bytes.push(data.ctrl.to_bits());
            bytes.extend_from_slice(&data.frame_counter.to_le_bytes());
            bytes
        }
        None => vec![frame.mhdr],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Uplink observed in the wild: DevAddr 0x26BF7AF1, FCnt 0, FPort + 2
    // trailing payload bytes.
    const REFERENCE_PACKET: [u8; 11] =
        [0x40, 0xF1, 0x7A, 0xBF, 0x26, 0x00, 0x00, 0x00, 0x01, 0xAF, 0xBF];

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        prop_compose! {
            fn arb_decoded_frame()(
                mhdr in any::<u8>(),
                dev_addr in any::<u32>(),
                fctrl in any::<u8>(),
                frame_counter in any::<u16>()
            ) -> DecodedFrame {
                let message_type = MessageType::from_mhdr(mhdr);
                let data = message_type.carries_device_address().then(|| DataFields {
                    device_address: DeviceAddress(dev_addr),
                    ctrl: CtrlFlags::from_bits(fctrl),
                    frame_counter,
                });
                DecodedFrame { message_type, mhdr, data }
            }
        }

        proptest! {
            #[test]
            fn decode_never_panics(raw in prop::collection::vec(any::<u8>(), 0..64)) {
                let _ = decode(&raw);
            }

            #[test]
            fn encode_then_decode_is_identity(frame in arb_decoded_frame()) {
                let bytes = encode(&frame);
                let reparsed = decode(&bytes).expect("encoded frames always decode");
                prop_assert_eq!(reparsed, frame);
            }

            #[test]
            fn short_data_frames_fail_as_truncated(
                mtype in 2u8..=5u8,
                low_bits in 0u8..32u8,
                extra in prop::collection::vec(any::<u8>(), 0..7)
            ) {
                let mut raw = vec![(mtype << 5) | low_bits];
                raw.extend_from_slice(&extra);
                prop_assert!(raw.len() < DATA_HEADER_LEN);

                match decode(&raw) {
                    Err(AnalysisError::TruncatedFrame { required, actual, .. }) => {
                        prop_assert_eq!(required, DATA_HEADER_LEN);
                        prop_assert_eq!(actual, raw.len());
                    }
                    other => prop_assert!(false, "expected TruncatedFrame, got {:?}", other),
                }
            }

            #[test]
            fn non_data_frames_decode_from_one_byte(mtype in prop::sample::select(vec![0u8, 1, 6, 7])) {
                let mhdr = mtype << 5;
                let frame = decode(&[mhdr]).expect("single MHDR byte is enough");
                prop_assert_eq!(frame.mhdr, mhdr);
                prop_assert!(frame.data.is_none());
            }

            #[test]
            fn trailing_payload_bytes_are_ignored(
                trailing in prop::collection::vec(any::<u8>(), 0..32)
            ) {
                let mut raw = vec![0x40, 0xF1, 0x7A, 0xBF, 0x26, 0x00, 0x2A, 0x00];
                let header_only = decode(&raw).expect("full header decodes");
                raw.extend_from_slice(&trailing);
                let with_payload = decode(&raw).expect("payload does not affect the header");
                prop_assert_eq!(header_only, with_payload);
            }
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(decode(&[]), Err(AnalysisError::EmptyInput)));
    }

    #[test]
    fn reference_packet_fields() {
        let frame = decode(&REFERENCE_PACKET).expect("reference packet decodes");
        assert_eq!(frame.message_type, MessageType::UnconfirmedDataUp);
        assert_eq!(frame.mhdr, 0x40);

        let data = frame.data.expect("data frame");
        assert_eq!(data.device_address, DeviceAddress(0x26BF7AF1));
        assert_eq!(data.frame_counter, 0);
        assert!(!data.ctrl.adr);
        assert!(!data.ctrl.adr_ack_req);
        assert!(!data.ctrl.ack);
        assert!(!data.ctrl.f_pending);
    }

    #[test]
    fn reference_packet_header_reencodes_exactly() {
        let frame = decode(&REFERENCE_PACKET).expect("reference packet decodes");
        assert_eq!(encode(&frame), &REFERENCE_PACKET[..DATA_HEADER_LEN]);
    }

    #[test]
    fn exact_header_length_is_sufficient() {
        let raw = [0x80, 0x01, 0x02, 0x03, 0x04, 0x00, 0x2A, 0x00];
        let frame = decode(&raw).expect("8 bytes decode");
        assert_eq!(frame.message_type, MessageType::ConfirmedDataUp);
        assert_eq!(frame.frame_counter(), Some(42));
    }

    #[test]
    fn seven_bytes_is_truncated_for_data_types() {
        let raw = [0x40, 0xF1, 0x7A, 0xBF, 0x26, 0x00, 0x00];
        match decode(&raw) {
            Err(AnalysisError::TruncatedFrame { message_type, required, actual }) => {
                assert_eq!(message_type, MessageType::UnconfirmedDataUp);
                assert_eq!(required, DATA_HEADER_LEN);
                assert_eq!(actual, 7);
            }
            other => panic!("expected TruncatedFrame, got {other:?}"),
        }
    }

    #[test]
    fn join_request_carries_no_addressing() {
        let frame = decode(&[0x00]).expect("join request decodes from MHDR alone");
        assert_eq!(frame.message_type, MessageType::JoinRequest);
        assert_eq!(frame.data, None);
        assert_eq!(frame.device_address(), None);
    }

    #[test]
    fn reserved_mtypes_decode_as_unknown() {
        let frame = decode(&[0xC0]).expect("reserved MType is not rejected");
        assert_eq!(frame.message_type, MessageType::Unknown(6));
        assert!(frame.data.is_none());

        let frame = decode(&[0xE5]).expect("reserved MType is not rejected");
        assert_eq!(frame.message_type, MessageType::Unknown(7));
        assert_eq!(frame.mhdr, 0xE5);
    }

    #[test]
    fn reserved_mhdr_bits_survive_decoding() {
        let raw = [0x43, 0xF1, 0x7A, 0xBF, 0x26, 0x00, 0x00, 0x00];
        let frame = decode(&raw).expect("low MHDR bits do not affect decoding");
        assert_eq!(frame.message_type, MessageType::UnconfirmedDataUp);
        assert_eq!(frame.mhdr, 0x43);
        assert_eq!(encode(&frame)[0], 0x43);
    }

    #[test]
    fn fctrl_bits_map_to_flags() {
        let raw = [0x40, 0xF1, 0x7A, 0xBF, 0x26, 0xA0, 0x07, 0x00];
        let data = decode(&raw).expect("decodes").data.expect("data frame");
        assert!(data.ctrl.adr);
        assert!(!data.ctrl.adr_ack_req);
        assert!(data.ctrl.ack);
        assert!(!data.ctrl.f_pending);
        assert_eq!(data.frame_counter, 7);
    }

    #[test]
    fn frame_counter_is_little_endian() {
        let raw = [0x40, 0xF1, 0x7A, 0xBF, 0x26, 0x00, 0x34, 0x12];
        let frame = decode(&raw).expect("decodes");
        assert_eq!(frame.frame_counter(), Some(0x1234));
    }
}

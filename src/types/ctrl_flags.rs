//! FCtrl link-control flag decoding

use serde::{Deserialize, Serialize};

const ADR: u8 = 1 << 7;
const ADR_ACK_REQ: u8 = 1 << 6;
const ACK: u8 = 1 << 5;
const F_PENDING: u8 = 1 << 4;

/// Link-control flags from the upper nibble of the FCtrl byte.
///
/// The lower nibble (FOptsLen) is MAC-command bookkeeping and is not
/// represented here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CtrlFlags {
    /// Adaptive data rate enabled (bit 7).
    pub adr: bool,
    /// ADR acknowledgement requested (bit 6).
    pub adr_ack_req: bool,
    /// Frame acknowledges a confirmed transmission (bit 5).
    pub ack: bool,
    /// Gateway has more downlink data pending (bit 4).
    pub f_pending: bool,
}

impl CtrlFlags {
    /// Decode flags from a raw FCtrl byte.
    pub fn from_bits(fctrl: u8) -> Self {
        CtrlFlags {
            adr: fctrl & ADR != 0,
            adr_ack_req: fctrl & ADR_ACK_REQ != 0,
            ack: fctrl & ACK != 0,
            f_pending: fctrl & F_PENDING != 0,
        }
    }

    /// Encode flags back into an FCtrl byte with FOptsLen zero.
    pub fn to_bits(&self) -> u8 {
        let mut bits = 0;
        if self.adr {
            bits |= ADR;
        }
        if self.adr_ack_req {
            bits |= ADR_ACK_REQ;
        }
        if self.ack {
            bits |= ACK;
        }
        if self.f_pending {
            bits |= F_PENDING;
        }
        bits
    }

    /// True when no flag is set.
    pub fn is_empty(&self) -> bool {
        *self == CtrlFlags::default()
    }
}

//! LoRaWAN message types from the MHDR MType field

use std::fmt;

use serde::{Deserialize, Serialize};

/// Frame type carried in MHDR bits [7:5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    JoinRequest,
    JoinAccept,
    UnconfirmedDataUp,
    UnconfirmedDataDown,
    ConfirmedDataUp,
    ConfirmedDataDown,
    /// Reserved MType values 6 and 7, carried through for diagnostics.
    Unknown(u8),
}

impl MessageType {
    /// Extract the message type from a raw MHDR byte.
    pub fn from_mhdr(mhdr: u8) -> Self {
        match (mhdr >> 5) & 0x07 {
            0 => MessageType::JoinRequest,
            1 => MessageType::JoinAccept,
            2 => MessageType::UnconfirmedDataUp,
            3 => MessageType::UnconfirmedDataDown,
            4 => MessageType::ConfirmedDataUp,
            5 => MessageType::ConfirmedDataDown,
            other => MessageType::Unknown(other),
        }
    }

    /// The 3-bit MType value for this message type.
    pub fn mtype_bits(&self) -> u8 {
        match self {
            MessageType::JoinRequest => 0,
            MessageType::JoinAccept => 1,
            MessageType::UnconfirmedDataUp => 2,
            MessageType::UnconfirmedDataDown => 3,
            MessageType::ConfirmedDataUp => 4,
            MessageType::ConfirmedDataDown => 5,
            MessageType::Unknown(raw) => raw & 0x07,
        }
    }

    /// Whether frames of this type carry DevAddr, FCtrl and FCnt fields.
    pub fn carries_device_address(&self) -> bool {
        matches!(
            self,
            MessageType::UnconfirmedDataUp
                | MessageType::UnconfirmedDataDown
                | MessageType::ConfirmedDataUp
                | MessageType::ConfirmedDataDown
        )
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageType::JoinRequest => "Join Request",
            MessageType::JoinAccept => "Join Accept",
            MessageType::UnconfirmedDataUp => "Unconfirmed Data Up",
            MessageType::UnconfirmedDataDown => "Unconfirmed Data Down",
            MessageType::ConfirmedDataUp => "Confirmed Data Up",
            MessageType::ConfirmedDataDown => "Confirmed Data Down",
            MessageType::Unknown(_) => "Unknown",
        };
        f.write_str(name)
    }
}

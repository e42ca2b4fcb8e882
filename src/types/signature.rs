//! Opaque replay-detection tokens

use std::fmt;

use serde::{Deserialize, Serialize};

/// Replay-detection token supplied by an external signature provider.
///
/// Typically a hash over ciphertext and MIC. The analyzer treats the token
/// as opaque: it only ever compares tokens for exact equality and never
/// derives one from frame contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSignature(Box<[u8]>);

impl FrameSignature {
    /// Wrap raw token bytes.
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        FrameSignature(bytes.into())
    }

    /// The raw token bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for FrameSignature {
    fn from(bytes: Vec<u8>) -> Self {
        FrameSignature(bytes.into())
    }
}

impl From<&[u8]> for FrameSignature {
    fn from(bytes: &[u8]) -> Self {
        FrameSignature(bytes.into())
    }
}

impl fmt::Display for FrameSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

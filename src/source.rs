//! Frame source abstraction
//!
//! The analyzer consumes an ordered stream of raw byte sequences and has no
//! opinion about where they come from. Sources abstract over radio hardware,
//! a network listener, or a recorded capture, and handle their own timing
//! internally.

use std::sync::Arc;

use crate::Result;
use crate::types::FrameSignature;

/// One raw frame handed to the analyzer.
///
/// The payload is the LoRaWAN PHY payload as received; the optional
/// signature is a replay-detection token computed by an external provider
/// (e.g. a hash over ciphertext and MIC). The analyzer never derives the
/// token itself.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Raw PHY payload bytes, shared cheaply across tasks.
    pub payload: Arc<[u8]>,
    /// Replay-detection token, when a signature provider supplied one.
    pub signature: Option<FrameSignature>,
}

impl RawFrame {
    /// Wrap raw payload bytes with no signature.
    pub fn new(payload: impl Into<Arc<[u8]>>) -> Self {
        RawFrame { payload: payload.into(), signature: None }
    }

    /// Attach a provider-supplied replay signature.
    pub fn with_signature(mut self, signature: FrameSignature) -> Self {
        self.signature = Some(signature);
        self
    }
}

/// Trait for raw frame sources.
///
/// Sources yield frames one at a time in arrival order. The trait is
/// designed for simplicity - one method covers all needs.
#[async_trait::async_trait]
pub trait FrameSource: Send + 'static {
    /// Get the next raw frame.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` - New frame available
    /// - `Ok(None)` - Stream ended (normal termination)
    /// - `Err(e)` - Error occurred
    async fn next_frame(&mut self) -> Result<Option<RawFrame>>;
}

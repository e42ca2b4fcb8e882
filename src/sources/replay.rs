//! Replay source for recorded capture files
//!
//! A capture file holds one frame per line as a hex-encoded PHY payload,
//! optionally followed by whitespace and a hex-encoded signature token.
//! `#` starts a comment and blank lines are ignored:
//!
//! ```text
//! # unconfirmed uplink from 0x26BF7AF1
//! 40F17ABF2600000001AFBF
//! 40F17ABF2600010001B0C2 0badf00d   # with a replay signature
//! ```
//!
//! The whole file is loaded and parsed eagerly at [`ReplaySource::open`],
//! so format errors surface immediately with line numbers instead of
//! mid-replay.

use std::collections::VecDeque;
use std::path::Path;

use tokio::time::{Duration, Interval, interval};
use tracing::{debug, info, trace};

use crate::error::{AnalysisError, Result};
use crate::source::{FrameSource, RawFrame};
use crate::types::FrameSignature;

/// Replay source that serves frames from a recorded capture file.
#[derive(Debug)]
pub struct ReplaySource {
    frames: VecDeque<RawFrame>,
    total: usize,
    served: usize,
    /// Inter-frame pacing period, when replaying at a fixed rate.
    pace: Option<Duration>,
    ticker: Option<Interval>,
}

impl ReplaySource {
    /// Load a capture file and prepare to serve its frames in order.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| AnalysisError::capture_error(path.to_path_buf(), source))?;
        let frames = parse_capture(&text)?;

        info!("Loaded capture {}: {} frames", path.display(), frames.len());

        Ok(Self {
            total: frames.len(),
            frames: frames.into(),
            served: 0,
            pace: None,
            ticker: None,
        })
    }

    /// Replay with a fixed interval between frames instead of full speed.
    pub fn with_pacing(mut self, period: Duration) -> Self {
        debug!("Replay pacing set to {:?} per frame", period);
        self.pace = Some(period);
        self.ticker = None;
        self
    }

    /// Total frames loaded from the capture file.
    pub fn total_frames(&self) -> usize {
        self.total
    }

    /// Frames served so far.
    pub fn served_frames(&self) -> usize {
        self.served
    }
}

#[async_trait::async_trait]
impl FrameSource for ReplaySource {
    async fn next_frame(&mut self) -> Result<Option<RawFrame>> {
        if self.frames.is_empty() {
            debug!("Reached end of capture after {} frames", self.served);
            return Ok(None);
        }

        // Wait for frame pacing before taking the frame, so a cancelled
        // read does not lose it. The ticker is created lazily so the
        // source can be opened outside a runtime.
        if let Some(period) = self.pace {
            let ticker = self.ticker.get_or_insert_with(|| interval(period));
            ticker.tick().await;
        }

        let Some(frame) = self.frames.pop_front() else {
            return Ok(None);
        };

        self.served += 1;
        trace!(
            "Frame {}/{}: {} bytes, signature={}",
            self.served,
            self.total,
            frame.payload.len(),
            frame.signature.is_some()
        );

        Ok(Some(frame))
    }
}

/// Parse capture text into frames, reporting the first malformed line.
fn parse_capture(text: &str) -> Result<Vec<RawFrame>> {
    let mut frames = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(payload_hex) = tokens.next() else {
            continue;
        };
        let payload = hex::decode(payload_hex).map_err(|e| {
            AnalysisError::capture_format(line_number, format!("invalid payload hex: {e}"))
        })?;

        let mut frame = RawFrame::new(payload);
        if let Some(signature_hex) = tokens.next() {
            let signature = hex::decode(signature_hex).map_err(|e| {
                AnalysisError::capture_format(line_number, format!("invalid signature hex: {e}"))
            })?;
            frame = frame.with_signature(FrameSignature::new(signature));
        }
        if tokens.next().is_some() {
            return Err(AnalysisError::capture_format(
                line_number,
                "expected at most a payload and a signature token",
            ));
        }

        frames.push(frame);
    }

    Ok(frames)
}

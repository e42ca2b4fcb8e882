//! Error types for frame analysis.
//!
//! All errors implement the `std::error::Error` trait and carry structured
//! context for diagnostics.
//!
//! ## Error Categories
//!
//! - **Decode Errors**: a single PHY payload could not be parsed
//!   (`EmptyInput`, `TruncatedFrame`)
//! - **Capture Errors**: a capture file could not be read or contains
//!   malformed lines (`Capture`, `CaptureFormat`)
//!
//! ## Frame-local vs. source-level failures
//!
//! Decode errors condemn one frame, never the run: the expected caller
//! policy is to log the failure and continue with the next frame. Capture
//! errors mean the frame source itself is unusable.
//!
//! ```rust
//! use chirpwatch::AnalysisError;
//!
//! let error = AnalysisError::EmptyInput;
//! if error.is_frame_local() {
//!     println!("skip this frame, keep the pipeline alive");
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::MessageType;

/// Result type alias for analysis operations.
pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;

/// Main error type for frame analysis operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("empty PHY payload")]
    EmptyInput,

    #[error("truncated {message_type} frame: need {required} bytes, got {actual}")]
    TruncatedFrame { message_type: MessageType, required: usize, actual: usize },

    #[error("capture file error: {path}")]
    Capture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed capture line {line}: {details}")]
    CaptureFormat { line: usize, details: String },
}

impl AnalysisError {
    /// Returns whether this error condemns only the current frame.
    ///
    /// Frame-local errors are skipped with a warning while processing
    /// continues; non-local errors terminate the frame source.
    pub fn is_frame_local(&self) -> bool {
        match self {
            AnalysisError::EmptyInput => true,
            AnalysisError::TruncatedFrame { .. } => true,
            AnalysisError::Capture { .. } => false,
            AnalysisError::CaptureFormat { .. } => false,
        }
    }

    /// Helper constructor for truncated-frame errors.
    pub fn truncated(message_type: MessageType, required: usize, actual: usize) -> Self {
        AnalysisError::TruncatedFrame { message_type, required, actual }
    }

    /// Helper constructor for capture file errors with path context.
    pub fn capture_error(path: PathBuf, source: std::io::Error) -> Self {
        AnalysisError::Capture { path, source }
    }

    /// Helper constructor for malformed capture lines.
    pub fn capture_format(line: usize, details: impl Into<String>) -> Self {
        AnalysisError::CaptureFormat { line, details: details.into() }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::Capture { path: PathBuf::from("<unknown>"), source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn truncated_messages_contain_both_lengths(
                required in 1usize..16usize,
                actual in 0usize..16usize
            ) {
                let err = AnalysisError::truncated(
                    MessageType::ConfirmedDataUp,
                    required,
                    actual,
                );
                let msg = err.to_string();
                prop_assert!(msg.contains(&required.to_string()));
                prop_assert!(msg.contains(&actual.to_string()));
                prop_assert!(msg.contains("Confirmed Data Up"));
            }

            #[test]
            fn capture_format_messages_contain_line_and_details(
                line in 1usize..10000usize,
                details in "[a-z ]{1,40}"
            ) {
                let err = AnalysisError::capture_format(line, details.clone());
                let msg = err.to_string();
                prop_assert!(msg.contains(&line.to_string()));
                prop_assert!(msg.contains(&details));
            }

            #[test]
            fn io_conversions_preserve_the_source_message(reason in "[a-z ]{1,40}") {
                let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, reason.clone());
                let converted: AnalysisError = io_err.into();
                match converted {
                    AnalysisError::Capture { source, .. } => {
                        prop_assert_eq!(source.to_string(), reason);
                    }
                    _ => prop_assert!(false, "expected Capture error from io::Error conversion"),
                }
            }
        }
    }

    #[test]
    fn frame_local_classification() {
        let empty = AnalysisError::EmptyInput;
        let truncated = AnalysisError::truncated(MessageType::UnconfirmedDataUp, 8, 3);
        let capture = AnalysisError::capture_error(
            PathBuf::from("/captures/run1.txt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let format = AnalysisError::capture_format(7, "odd-length hex");

        assert!(empty.is_frame_local());
        assert!(truncated.is_frame_local());
        assert!(!capture.is_frame_local());
        assert!(!format.is_frame_local());
    }

    #[test]
    fn error_traits_validation() {
        // Compile-time check: AnalysisError must be Send + Sync + 'static
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<AnalysisError>();

        let error = AnalysisError::EmptyInput;
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn error_constructors_validation() {
        let capture_error = AnalysisError::capture_error(
            PathBuf::from("/test"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
        );
        assert!(matches!(capture_error, AnalysisError::Capture { .. }));

        let format_error = AnalysisError::capture_format(1, "bad line");
        assert!(matches!(format_error, AnalysisError::CaptureFormat { .. }));
    }
}

//! Error types for label persistence.

use thiserror::Error;

/// Errors that can occur while encoding, decoding, or persisting labels.
///
/// Malformed label content is deliberately absent here: bad lines are
/// skipped and reported as [`DecodeWarning`](crate::format::DecodeWarning)s,
/// never as errors.
#[derive(Error, Debug)]
pub enum LabelError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image dimensions are zero; normalized coordinates are undefined
    #[error("Invalid image size: {width}x{height}")]
    InvalidImageSize {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },
}

impl LabelError {
    /// Create an invalid-image-size error from the offending dimensions.
    pub fn invalid_image_size(width: u32, height: u32) -> Self {
        Self::InvalidImageSize { width, height }
    }
}

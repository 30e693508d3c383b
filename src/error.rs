//! Error types for descriptor extraction and comparison.

use thiserror::Error;

/// Errors raised by the PHOG pipeline and its feature vector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhogError {
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("unsupported channel count: {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(usize),

    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("histogram length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("range {offset}..{offset}+{length} exceeds input of {available} bytes")]
    OutOfBounds {
        offset: usize,
        length: usize,
        available: usize,
    },
}

/// Result type for PHOG operations
pub type PhogResult<T> = Result<T, PhogError>;

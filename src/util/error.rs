//! Error types for harris-corner.

use thiserror::Error;

/// Result alias for harris-corner operations.
pub type HarrisResult<T> = std::result::Result<T, HarrisError>;

/// Errors that can occur when computing responses or suppressing maxima.
///
/// Every variant describes a contract violation detected before any work is
/// done; none of them is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarrisError {
    /// The input image is unusable (wrong channel count, empty, mismatched sizes).
    #[error("invalid input: {reason}")]
    InvalidInput { reason: &'static str },
    /// A tuning parameter is outside its accepted domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    /// The backing buffer is shorter than the declared geometry requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The row stride is shorter than a packed row.
    #[error("invalid stride {stride} for row length {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Image decoding or encoding failed.
    #[cfg(feature = "image-io")]
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}

impl HarrisError {
    pub(crate) fn input(reason: &'static str) -> Self {
        Self::InvalidInput { reason }
    }

    pub(crate) fn param(name: &'static str, reason: &'static str) -> Self {
        Self::InvalidParameter { name, reason }
    }
}

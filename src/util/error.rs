//! Error types for posedecode.

use thiserror::Error;

/// Result alias for posedecode operations.
pub type PoseResult<T> = std::result::Result<T, PoseError>;

/// Errors that can occur when decoding pose network output.
///
/// An empty detection set is not an error; decoding and suppression report it
/// as an empty list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseError {
    /// The keypoint count yields no usable anchor layout.
    #[error("invalid buffer shape: {num_keypoints} keypoints (stride {stride})")]
    InvalidBufferShape {
        /// Requested keypoints per anchor.
        num_keypoints: usize,
        /// Values per anchor derived from the keypoint count.
        stride: usize,
    },
    /// A pipeline configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

//! Error types for encoding and rendering.

use thiserror::Error;

/// Errors surfaced by the encoder, the renderer and the file helpers.
///
/// Ways to handle [`QrError::CapacityExceeded`] include:
///
/// - Decrease the error correction level if it was greater than `QrCodeEcc::Low`.
/// - Change the text to be shorter.
/// - Switch to [`CapacityPolicy::Clamp`](crate::options::CapacityPolicy::Clamp) to get the
///   truncated version 10 symbol instead of an error.
#[derive(Debug, Error)]
pub enum QrError {
    #[error("render target cannot provide pixel access: {0}")]
    InvalidTarget(String),

    #[error("image size {size} is below the minimum of {min} pixels")]
    InvalidSize { size: u32, min: u32 },

    #[error("data length = {len} bytes, max capacity = {capacity} bytes")]
    CapacityExceeded { len: usize, capacity: usize },

    /// `glog(0)` was requested. Only reachable through a broken internal invariant.
    #[error("logarithm of zero is undefined in GF(256)")]
    Domain,

    #[error("unknown error correction level: {0:?}")]
    UnknownLevel(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

//! Morphological image processing operations.

/// Error types used for morphological operations.
mod error;
pub use error::MorphologyError;

/// The structuring element.
mod kernels;
pub use kernels::Kernel;

/// Dilation over an arbitrary structuring element.
mod ops;
pub use ops::dilate;

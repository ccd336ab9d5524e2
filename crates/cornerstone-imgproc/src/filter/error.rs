use cornerstone_image::ImageError;

/// An error type for the filter module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The kernel sigma must be finite, strictly positive and at most 1024.
    #[error("Kernel sigma must be finite and in (0, 1024], got {0}")]
    InvalidSigma(f32),

    /// The kernel must have an odd, non-zero length.
    #[error("Kernel size must be odd and > 0, got {0}")]
    InvalidKernelSize(usize),

    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}

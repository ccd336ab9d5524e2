use cornerstone_image::ImageError;

/// Errors related to morphological operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MorphologyError {
    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}

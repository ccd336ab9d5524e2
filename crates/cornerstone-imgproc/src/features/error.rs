use cornerstone_image::ImageError;

use crate::filter::FilterError;
use crate::morphology::MorphologyError;

/// An error type for the corner detector.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CornerDetectorError {
    /// The quality level must lie in (0, 1].
    #[error("Quality level must be in (0, 1], got {0}")]
    InvalidQualityLevel(f32),

    /// The metric name is not one of `harris`, `harmonic_mean` or `min_eigen`.
    #[error("Unknown corner metric `{0}`, expected one of: harris, harmonic_mean, min_eigen")]
    UnknownMetric(String),

    /// Error while building kernels or filtering.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Error in the local maximum search.
    #[error(transparent)]
    Morphology(#[from] MorphologyError),

    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}

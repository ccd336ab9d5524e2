//! Feature detection and keypoint extraction.
//!
//! This module implements a structure-tensor corner detector. For every pixel the
//! local second-moment matrix
//!
//! ```text
//! M = [[A, B],
//!      [B, C]],   A = w * Ix², B = w * IxIy, C = w * Iy²
//! ```
//!
//! is built from gaussian-derivative gradients smoothed by a gaussian window `w`.
//! A [`CornerMetric`] reduces `M` to a response, and keypoints are the strong local
//! maxima of that response.
//!
//! # Pipeline
//!
//! 1. [`spatial_gradient_gaussian`]: image → (Ix, Iy)
//! 2. [`StructureTensor::from_gradients`]: (Ix, Iy) → (A, B, C)
//! 3. [`corner_response`]: (A, B, C) → response
//! 4. [`select_local_maxima`]: response → keypoint positions
//!
//! [`CornerDetector`] runs the four stages with kernels built once from its
//! [`CornerDetectorConfig`].
//!
//! # Examples
//!
//! ```
//! use cornerstone_image::Image;
//! use cornerstone_imgproc::features::{CornerDetector, CornerDetectorConfig, CornerMetric};
//!
//! let mut data = vec![0.0f32; 32 * 32];
//! for y in 16..32 {
//!     for x in 16..32 {
//!         data[y * 32 + x] = 1.0;
//!     }
//! }
//! let image = Image::<f32, 1>::new([32, 32].into(), data).unwrap();
//!
//! let detector = CornerDetector::new(
//!     CornerDetectorConfig::default()
//!         .with_metric(CornerMetric::MinEigen)
//!         .with_quality_level(0.5),
//! )
//! .unwrap();
//!
//! let keypoints = detector.detect(&image).unwrap();
//! assert!(!keypoints.is_empty());
//! ```

mod detector;
pub use detector::*;

mod error;
pub use error::CornerDetectorError;

mod gradients;
pub use gradients::*;

mod keypoint;
pub use keypoint::KeyPoint;

mod nms;
pub use nms::*;

mod responses;
pub use responses::*;

mod structure_tensor;
pub use structure_tensor::StructureTensor;

mod viewer;
pub use viewer::{LogViewer, StageViewer, ViewerError};

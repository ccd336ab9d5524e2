use cornerstone_image::{Image, ImageError};

use super::{CornerDetectorError, StructureTensor};
use crate::parallel::{for_each_row_mut, ExecutionStrategy};

/// Weight of the squared trace in the Harris response.
pub const HARRIS_ALPHA: f32 = 0.06;

/// The corner response used to score the structure tensor `[[a, b], [b, c]]`.
///
/// All variants return a finite, non-negative value where larger means more
/// corner-like. Flat regions (`a + c == 0`) score zero for every variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CornerMetric {
    /// `det(M) - 0.06 * trace(M)^2`, negative values clamped to zero.
    #[default]
    Harris,
    /// `a * c / (a + c)`, zero when the trace vanishes.
    HarmonicMean,
    /// The smallest eigenvalue of `M` (Shi-Tomasi).
    MinEigen,
}

impl CornerMetric {
    /// Compute the response for a single tensor.
    ///
    /// # Examples
    ///
    /// ```
    /// use cornerstone_imgproc::features::CornerMetric;
    ///
    /// // an isotropic corner
    /// assert_eq!(CornerMetric::MinEigen.response(1.0, 0.0, 1.0), 1.0);
    /// // a straight edge has one zero eigenvalue
    /// assert_eq!(CornerMetric::MinEigen.response(1.0, 0.0, 0.0), 0.0);
    /// ```
    #[inline]
    pub fn response(&self, a: f32, b: f32, c: f32) -> f32 {
        let r = match self {
            CornerMetric::Harris => {
                let det = a * c - b * b;
                let trace = a + c;
                det - HARRIS_ALPHA * trace * trace
            }
            CornerMetric::HarmonicMean => {
                let trace = a + c;
                if trace > 0.0 {
                    a * c / trace
                } else {
                    0.0
                }
            }
            CornerMetric::MinEigen => {
                let det = a * c - b * b;
                let trace = a + c;
                // rounding can push the discriminant slightly below zero
                let disc = (trace * trace - 4.0 * det).max(0.0);
                0.5 * (trace - disc.sqrt())
            }
        };

        if r.is_finite() {
            r.max(0.0)
        } else {
            0.0
        }
    }

    /// The metric name as accepted by [`str::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            CornerMetric::Harris => "harris",
            CornerMetric::HarmonicMean => "harmonic_mean",
            CornerMetric::MinEigen => "min_eigen",
        }
    }
}

impl std::fmt::Display for CornerMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CornerMetric {
    type Err = CornerDetectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "harris" => Ok(CornerMetric::Harris),
            "harmonic_mean" => Ok(CornerMetric::HarmonicMean),
            "min_eigen" => Ok(CornerMetric::MinEigen),
            _ => Err(CornerDetectorError::UnknownMetric(s.to_string())),
        }
    }
}

/// Compute the corner response of a structure tensor field.
///
/// Every pixel is scored independently with `metric`.
///
/// # Arguments
///
/// * `tensor` - The structure tensor with fields of shape (H, W).
/// * `metric` - The corner metric.
/// * `dst` - The response image with shape (H, W).
/// * `strategy` - The execution strategy.
pub fn corner_response(
    tensor: &StructureTensor,
    metric: CornerMetric,
    dst: &mut Image<f32, 1>,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    let size = tensor.a.size();
    for other in [tensor.b.size(), tensor.c.size(), dst.size()] {
        if other != size {
            return Err(ImageError::InvalidImageSize(
                other.width,
                other.height,
                size.width,
                size.height,
            ));
        }
    }

    let cols = size.width;
    let (a, b, c) = (tensor.a.as_slice(), tensor.b.as_slice(), tensor.c.as_slice());

    for_each_row_mut(strategy, dst.as_slice_mut(), cols, |r, row| {
        let off = r * cols;
        row.iter_mut()
            .zip(&a[off..off + cols])
            .zip(&b[off..off + cols])
            .zip(&c[off..off + cols])
            .for_each(|(((p, &va), &vb), &vc)| *p = metric.response(va, vb, vc));
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const METRICS: [CornerMetric; 3] = [
        CornerMetric::Harris,
        CornerMetric::HarmonicMean,
        CornerMetric::MinEigen,
    ];

    #[test]
    fn test_isotropic_corner() {
        assert_relative_eq!(
            CornerMetric::Harris.response(1.0, 0.0, 1.0),
            0.76,
            epsilon = 1e-6
        );
        assert_relative_eq!(CornerMetric::HarmonicMean.response(1.0, 0.0, 1.0), 0.5);
        assert_relative_eq!(CornerMetric::MinEigen.response(1.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_rotated_tensor() {
        // eigenvalues 1 and 3
        assert_relative_eq!(CornerMetric::MinEigen.response(2.0, 1.0, 2.0), 1.0);
        assert_relative_eq!(
            CornerMetric::Harris.response(2.0, 1.0, 2.0),
            3.0 - 0.06 * 16.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_edge_is_not_a_corner() {
        for metric in METRICS {
            assert_eq!(metric.response(5.0, 0.0, 0.0), 0.0, "{metric}");
            assert_eq!(metric.response(0.0, 0.0, 5.0), 0.0, "{metric}");
        }
    }

    #[test]
    fn test_flat_region_is_zero() {
        for metric in METRICS {
            let r = metric.response(0.0, 0.0, 0.0);
            assert!(r.is_finite());
            assert_eq!(r, 0.0, "{metric}");
        }
    }

    #[test]
    fn test_non_finite_input_is_zero() {
        for metric in METRICS {
            assert_eq!(metric.response(f32::NAN, 0.0, 1.0), 0.0, "{metric}");
            assert_eq!(metric.response(f32::INFINITY, 0.0, 1.0), 0.0, "{metric}");
        }
    }

    #[test]
    fn test_min_eigen_negative_discriminant() {
        // b * b slightly above a * c from rounding: rank-one tensor
        let (gx, gy) = (0.3f32, 0.7f32);
        let r = CornerMetric::MinEigen.response(gx * gx, gx * gy, gy * gy);
        assert!(r.is_finite());
        assert!(r >= 0.0 && r < 1e-6);
    }

    #[test]
    fn test_metric_from_str() -> Result<(), CornerDetectorError> {
        for metric in METRICS {
            assert_eq!(metric.as_str().parse::<CornerMetric>()?, metric);
        }
        assert_eq!(
            "fast".parse::<CornerMetric>(),
            Err(CornerDetectorError::UnknownMetric("fast".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_corner_response_field() -> Result<(), ImageError> {
        let size = [2, 1].into();
        let tensor = StructureTensor {
            a: Image::new(size, vec![1.0, 0.0])?,
            b: Image::new(size, vec![0.0, 0.0])?,
            c: Image::new(size, vec![1.0, 0.0])?,
        };
        let mut dst = Image::from_size_val(size, -1.0)?;

        corner_response(
            &tensor,
            CornerMetric::HarmonicMean,
            &mut dst,
            ExecutionStrategy::Serial,
        )?;
        assert_eq!(dst.as_slice(), &[0.5, 0.0]);

        let mut wrong = Image::from_size_val([1, 1].into(), 0.0)?;
        assert_eq!(
            corner_response(
                &tensor,
                CornerMetric::Harris,
                &mut wrong,
                ExecutionStrategy::Serial
            ),
            Err(ImageError::InvalidImageSize(1, 1, 2, 1))
        );
        Ok(())
    }
}

use super::FilterError;

/// Number of standard deviations covered on each side of a sampled gaussian.
const GAUSSIAN_TRUNCATE: f32 = 4.0;

/// Largest kernel radius derived from a sigma, i.e. sigma up to 1024.
pub const MAX_KERNEL_RADIUS: usize = 4096;

fn check_sigma(sigma: f32) -> Result<(), FilterError> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FilterError::InvalidSigma(sigma));
    }
    Ok(())
}

fn check_kernel_size(kernel_size: usize) -> Result<(), FilterError> {
    if kernel_size % 2 == 0 {
        return Err(FilterError::InvalidKernelSize(kernel_size));
    }
    Ok(())
}

/// Compute the kernel size needed to sample a gaussian of the given sigma.
///
/// The kernel covers `±ceil(4 * sigma)` taps around the center, which leaves
/// less than 1e-4 of the gaussian mass outside the support.
///
/// # Errors
///
/// Returns [`FilterError::InvalidSigma`] if sigma is not finite and positive, or if
/// the radius would exceed [`MAX_KERNEL_RADIUS`].
///
/// # Arguments
///
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// The odd kernel size.
pub fn kernel_size_from_sigma(sigma: f32) -> Result<usize, FilterError> {
    check_sigma(sigma)?;
    let radius = (GAUSSIAN_TRUNCATE * sigma).ceil().max(1.0);
    if radius > MAX_KERNEL_RADIUS as f32 {
        return Err(FilterError::InvalidSigma(sigma));
    }
    Ok(2 * radius as usize + 1)
}

/// Create a gaussian blur kernel.
///
/// The kernel is normalized to unit sum and symmetric about its center tap.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Result<Vec<f32>, FilterError> {
    check_kernel_size(kernel_size)?;
    check_sigma(sigma)?;

    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    Ok(kernel)
}

/// Create a gaussian blur kernel sized from its sigma.
///
/// See [`kernel_size_from_sigma`] for the size rule.
pub fn gaussian_kernel_1d_from_sigma(sigma: f32) -> Result<Vec<f32>, FilterError> {
    gaussian_kernel_1d(kernel_size_from_sigma(sigma)?, sigma)
}

/// Create a first derivative of gaussian kernel.
///
/// The taps are laid out for correlation: the tap at offset `o` from the center is
/// `o * g(o) / sum(o^2 * g(o))`, so filtering a unit ramp gives exactly one. The kernel
/// is antisymmetric (`k[i] == -k[n - 1 - i]`), its center tap is zero and its taps
/// sum to zero, so it adds no DC bias to the gradient.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the underlying gaussian.
///
/// # Returns
///
/// A vector of the kernel.
pub fn gaussian_derivative_kernel_1d(
    kernel_size: usize,
    sigma: f32,
) -> Result<Vec<f32>, FilterError> {
    let gaussian = gaussian_kernel_1d(kernel_size, sigma)?;
    let radius = kernel_size / 2;

    // second moment of the sampled gaussian
    let norm = (1..=radius)
        .map(|o| 2.0 * (o * o) as f32 * gaussian[radius + o])
        .sum::<f32>();

    let mut kernel = vec![0.0f32; kernel_size];
    for o in 1..=radius {
        let tap = o as f32 * gaussian[radius + o] / norm;
        kernel[radius + o] = tap;
        kernel[radius - o] = -tap;
    }

    Ok(kernel)
}

/// Create a first derivative of gaussian kernel sized from its sigma.
///
/// See [`kernel_size_from_sigma`] for the size rule.
pub fn gaussian_derivative_kernel_1d_from_sigma(sigma: f32) -> Result<Vec<f32>, FilterError> {
    gaussian_derivative_kernel_1d(kernel_size_from_sigma(sigma)?, sigma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gaussian_kernel_1d() -> Result<(), FilterError> {
        let kernel = gaussian_kernel_1d(5, 0.5)?;

        let expected = [
            0.00026386508,
            0.10645077,
            0.78657067,
            0.10645077,
            0.00026386508,
        ];

        for (i, &k) in kernel.iter().enumerate() {
            assert_eq!(k, expected[i]);
        }
        Ok(())
    }

    #[test]
    fn test_kernel_size_from_sigma() -> Result<(), FilterError> {
        assert_eq!(kernel_size_from_sigma(1.0)?, 9);
        assert_eq!(kernel_size_from_sigma(1.5)?, 13);
        assert_eq!(kernel_size_from_sigma(0.1)?, 3);
        Ok(())
    }

    #[test]
    fn test_huge_sigma_is_rejected() {
        for sigma in [1025.0, 1e9, 1e20, f32::MAX] {
            assert_eq!(
                kernel_size_from_sigma(sigma),
                Err(FilterError::InvalidSigma(sigma))
            );
            assert!(matches!(
                gaussian_derivative_kernel_1d_from_sigma(sigma),
                Err(FilterError::InvalidSigma(_))
            ));
        }
        assert_eq!(kernel_size_from_sigma(1024.0), Ok(2 * MAX_KERNEL_RADIUS + 1));
    }

    #[test]
    fn test_invalid_sigma() {
        for sigma in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                gaussian_kernel_1d_from_sigma(sigma),
                Err(FilterError::InvalidSigma(_))
            ));
            assert!(matches!(
                gaussian_derivative_kernel_1d_from_sigma(sigma),
                Err(FilterError::InvalidSigma(_))
            ));
        }
    }

    #[test]
    fn test_even_kernel_size() {
        assert_eq!(
            gaussian_kernel_1d(4, 1.0),
            Err(FilterError::InvalidKernelSize(4))
        );
    }

    #[test]
    fn test_gaussian_kernel_symmetric_unit_sum() -> Result<(), FilterError> {
        for sigma in [0.5, 1.0, 2.0, 3.3] {
            let kernel = gaussian_kernel_1d_from_sigma(sigma)?;
            let n = kernel.len();
            assert_eq!(n % 2, 1);
            for i in 0..n {
                assert_eq!(kernel[i], kernel[n - 1 - i]);
            }
            assert_abs_diff_eq!(kernel.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_derivative_kernel_antisymmetric() -> Result<(), FilterError> {
        for sigma in [0.5, 1.0, 2.0, 3.3] {
            let kernel = gaussian_derivative_kernel_1d_from_sigma(sigma)?;
            let n = kernel.len();
            assert_eq!(kernel[n / 2], 0.0);
            for i in 0..n {
                assert_eq!(kernel[i], -kernel[n - 1 - i]);
            }
            assert_abs_diff_eq!(kernel.iter().sum::<f32>(), 0.0, epsilon = 1e-6);

            // unit response to a ramp
            let slope = kernel
                .iter()
                .enumerate()
                .map(|(i, &k)| k * (i as f32 - (n / 2) as f32))
                .sum::<f32>();
            assert_abs_diff_eq!(slope, 1.0, epsilon = 1e-5);
        }
        Ok(())
    }
}

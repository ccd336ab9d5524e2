use cornerstone_image::{Image, ImageError};

use crate::filter::{separable_filter, FilterError, FloatConversion};
use crate::padding::PaddingMode;
use crate::parallel::ExecutionStrategy;

/// Border mode shared by every filter of the corner pipeline.
pub const CORNER_PADDING: PaddingMode = PaddingMode::Reflect101;

/// Compute the gaussian-derivative gradients of an image.
///
/// `dx` is the image correlated with `derivative_kernel` along the rows and with
/// `smoothing_kernel` along the columns; `dy` swaps the two kernels. Borders are
/// extended with reflect-101.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dx` - The horizontal gradient with shape (H, W).
/// * `dy` - The vertical gradient with shape (H, W).
/// * `smoothing_kernel` - The 1-D gaussian kernel.
/// * `derivative_kernel` - The 1-D derivative of gaussian kernel.
/// * `strategy` - The execution strategy.
pub fn spatial_gradient_gaussian<T>(
    src: &Image<T, 1>,
    dx: &mut Image<f32, 1>,
    dy: &mut Image<f32, 1>,
    smoothing_kernel: &[f32],
    derivative_kernel: &[f32],
    strategy: ExecutionStrategy,
) -> Result<(), FilterError>
where
    T: FloatConversion + Sync,
{
    if dx.size() != dy.size() {
        return Err(ImageError::InvalidImageSize(
            dy.width(),
            dy.height(),
            dx.width(),
            dx.height(),
        )
        .into());
    }

    separable_filter(
        src,
        dx,
        derivative_kernel,
        smoothing_kernel,
        CORNER_PADDING,
        strategy,
    )?;
    separable_filter(
        src,
        dy,
        smoothing_kernel,
        derivative_kernel,
        CORNER_PADDING,
        strategy,
    )?;

    Ok(())
}

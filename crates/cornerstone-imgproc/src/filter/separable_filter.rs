use cornerstone_image::{Image, ImageError};

use super::FilterError;
use crate::padding::PaddingMode;
use crate::parallel::{for_each_row_mut, ExecutionStrategy};

/// Trait for floating point casting
pub trait FloatConversion {
    /// Convert the type to f32
    fn to_f32(&self) -> f32;
}

impl FloatConversion for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }
}

impl FloatConversion for f64 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }
}

impl FloatConversion for u8 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }
}

impl FloatConversion for u16 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }
}

/// A separable 2D filter that applies horizontal and vertical 1D correlations sequentially.
///
/// Taps are accumulated in pairs around the center,
/// `k[r] * x[0] + (k[r - o] * x[-o] + k[r + o] * x[o])`, so an antisymmetric kernel
/// over a constant signal sums to exactly zero.
struct SeparableFilter<'a> {
    kernel_x: &'a [f32],
    kernel_y: &'a [f32],
    padding: PaddingMode,
}

impl SeparableFilter<'_> {
    /// Correlate one sample of a line with `kernel`.
    ///
    /// `read` maps an in-bounds position along the line to its value.
    #[inline]
    fn correlate(
        &self,
        kernel: &[f32],
        pos: usize,
        len: usize,
        read: impl Fn(usize) -> f32,
    ) -> f32 {
        let radius = kernel.len() / 2;
        let tap = |offset: isize| {
            self.padding
                .map_index(pos as isize + offset, len)
                .map_or(0.0, &read)
        };

        let mut acc = kernel[radius] * tap(0);
        for o in 1..=radius {
            let off = o as isize;
            acc += kernel[radius - o] * tap(-off) + kernel[radius + o] * tap(off);
        }
        acc
    }

    /// Apply the filter with horizontal filtering first, then vertical filtering
    /// from a temporary buffer.
    fn apply<T, const C: usize>(
        &self,
        src: &Image<T, C>,
        dst: &mut Image<f32, C>,
        strategy: ExecutionStrategy,
    ) where
        T: FloatConversion + Sync,
    {
        let rows = src.rows();
        let cols = src.cols();
        let stride = cols * C;

        let src_data = src.as_slice();
        let mut temp = vec![0.0f32; src_data.len()];

        // horizontal
        for_each_row_mut(strategy, &mut temp, stride, |r, row_temp| {
            let src_row = &src_data[r * stride..(r + 1) * stride];
            for c in 0..cols {
                for ch in 0..C {
                    row_temp[c * C + ch] = self.correlate(self.kernel_x, c, cols, |x| {
                        src_row[x * C + ch].to_f32()
                    });
                }
            }
        });

        // vertical
        let temp = temp.as_slice();
        for_each_row_mut(strategy, dst.as_slice_mut(), stride, |r, row_dst| {
            for c in 0..cols {
                for ch in 0..C {
                    row_dst[c * C + ch] = self.correlate(self.kernel_y, r, rows, |y| {
                        temp[y * stride + c * C + ch]
                    });
                }
            }
        });
    }
}

fn check_kernel(kernel: &[f32]) -> Result<(), FilterError> {
    if kernel.len() % 2 == 0 {
        return Err(FilterError::InvalidKernelSize(kernel.len()));
    }
    Ok(())
}

/// Apply a separable filter to an image.
///
/// The kernels are correlated with the image (no kernel flip), first along the
/// rows with `kernel_x`, then along the columns with `kernel_y`. Samples outside
/// of the image are taken according to `padding`, so `dst` always has the size
/// of `src`.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image with the same size as the source.
/// * `kernel_x` - The horizontal kernel, odd length.
/// * `kernel_y` - The vertical kernel, odd length.
/// * `padding` - The border handling mode.
/// * `strategy` - The execution strategy.
pub fn separable_filter<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<f32, C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
    padding: PaddingMode,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError>
where
    T: FloatConversion + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            src.width(),
            src.height(),
        )
        .into());
    }

    check_kernel(kernel_x)?;
    check_kernel(kernel_y)?;

    let filter = SeparableFilter {
        kernel_x,
        kernel_y,
        padding,
    };
    filter.apply(src, dst, strategy);

    Ok(())
}

/// Blur an image with the same 1-D kernel along both axes.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image with the same size as the source.
/// * `kernel` - The 1-D smoothing kernel, odd length.
/// * `padding` - The border handling mode.
/// * `strategy` - The execution strategy.
pub fn blur_with_kernel<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<f32, C>,
    kernel: &[f32],
    padding: PaddingMode,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError>
where
    T: FloatConversion + Sync,
{
    separable_filter(src, dst, kernel, kernel, padding, strategy)
}

use cornerstone_image::{Image, ImageError};

use super::{Kernel, MorphologyError};
use crate::parallel::{for_each_row_mut, ExecutionStrategy};

/// Dilate an image using a [`Kernel`].
///
/// Each pixel is replaced by the maximum value in the neighborhood defined by the
/// kernel. The pixel itself always takes part. Neighbors falling outside of the
/// image are ignored, so border pixels only compete with the pixels that exist.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The morphological structuring element ([`Kernel`]).
/// * `strategy` - The execution strategy.
///
/// # Returns
///
/// Ok(()) on success, or [`MorphologyError`] if shapes don't match.
pub fn dilate<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<(), MorphologyError>
where
    T: Copy + PartialOrd + Send + Sync,
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

    let width = src.width();
    let height = src.height();
    let stride = width * C;
    let (pad_h, pad_w) = kernel.pad();
    let k_width = kernel.width();
    let k_data = kernel.data();
    let src_data = src.as_slice();

    for_each_row_mut(strategy, dst.as_slice_mut(), stride, |h, row_chunk| {
        for w in 0..width {
            for c in 0..C {
                let idx = w * C + c;
                let mut max_val = src_data[h * stride + idx];

                for (k_idx, _) in k_data.iter().enumerate().filter(|&(_, &k)| k == 1) {
                    let py = (h + k_idx / k_width) as isize - pad_h as isize;
                    let px = (w + k_idx % k_width) as isize - pad_w as isize;
                    if py < 0 || px < 0 || py as usize >= height || px as usize >= width {
                        continue;
                    }

                    let val = src_data[py as usize * stride + px as usize * C + c];
                    if val > max_val {
                        max_val = val;
                    }
                }

                row_chunk[idx] = max_val;
            }
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dilate_3x3() -> Result<(), MorphologyError> {
        #[rustfmt::skip]
        let src = Image::<f32, 1>::new(
            [5, 4].into(),
            vec![
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 2.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 1.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
            ],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        dilate(&src, &mut dst, &Kernel::default(), ExecutionStrategy::Serial)?;

        #[rustfmt::skip]
        assert_eq!(dst.as_slice(), &[
            2.0, 2.0, 2.0, 0.0, 0.0,
            2.0, 2.0, 2.0, 1.0, 1.0,
            2.0, 2.0, 2.0, 1.0, 1.0,
            0.0, 0.0, 0.0, 1.0, 1.0,
        ]);
        Ok(())
    }

    #[test]
    fn test_dilate_ignores_outside_pixels() -> Result<(), MorphologyError> {
        // negative values must not be lifted to a zero border
        let src = Image::<f32, 1>::new([3, 1].into(), vec![-3.0, -1.0, -2.0])?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        dilate(&src, &mut dst, &Kernel::default(), ExecutionStrategy::Serial)?;
        assert_eq!(dst.as_slice(), &[-1.0, -1.0, -1.0]);
        Ok(())
    }

    #[test]
    fn test_dilate_u8_parallel() -> Result<(), MorphologyError> {
        #[rustfmt::skip]
        let src = Image::<u8, 1>::new(
            [3, 3].into(),
            vec![
                9, 0, 0,
                0, 0, 0,
                0, 0, 0,
            ],
        )?;
        let mut dst = src.clone();
        dilate(&src, &mut dst, &Kernel::default(), ExecutionStrategy::Parallel)?;

        #[rustfmt::skip]
        assert_eq!(dst.as_slice(), &[
            9, 9, 0,
            9, 9, 0,
            0, 0, 0,
        ]);
        Ok(())
    }
}

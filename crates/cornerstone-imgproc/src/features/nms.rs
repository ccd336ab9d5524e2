use cornerstone_image::Image;

use super::CornerDetectorError;
use crate::morphology::{dilate, Kernel};
use crate::parallel::{flat_map_rows, for_each_row_mut, ExecutionStrategy};

/// The strong local maxima of a response image.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalMaxima {
    /// The positions `[x, y]` of the maxima in row-major order.
    pub points: Vec<[usize; 2]>,
    /// A mask with 1 at every maximum and 0 elsewhere.
    pub mask: Image<u8, 1>,
    /// The largest response in the image.
    pub max_response: f32,
    /// The absolute threshold, `quality_level * max_response`.
    pub threshold: f32,
}

/// Find the strong local maxima of a response image.
///
/// A pixel is kept when its response is strictly above
/// `quality_level * max(response)` and equal to the maximum over its `kernel`
/// neighborhood. Pixels on a plateau of equal values are all kept.
///
/// # Arguments
///
/// * `response` - The response image with shape (H, W), finite values.
/// * `quality_level` - The fraction of the global maximum used as threshold.
/// * `kernel` - The neighborhood, usually a 3x3 box.
/// * `strategy` - The execution strategy.
pub fn select_local_maxima(
    response: &Image<f32, 1>,
    quality_level: f32,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<LocalMaxima, CornerDetectorError> {
    let size = response.size();
    let cols = size.width;

    let mut local_max = Image::from_size_val(size, 0.0f32)?;
    dilate(response, &mut local_max, kernel, strategy)?;

    let max_response = response
        .as_slice()
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);
    let threshold = quality_level * max_response;

    let resp = response.as_slice();
    let dilated = local_max.as_slice();
    let is_peak = |idx: usize| resp[idx] > threshold && resp[idx] == dilated[idx];

    let mut mask = Image::from_size_val(size, 0u8)?;
    if max_response > 0.0 {
        for_each_row_mut(strategy, mask.as_slice_mut(), cols, |r, row| {
            row.iter_mut()
                .enumerate()
                .for_each(|(c, m)| *m = u8::from(is_peak(r * cols + c)));
        });
    }

    let mask_data = mask.as_slice();
    let points = flat_map_rows(strategy, size.height, |r| {
        (0..cols)
            .filter(|&c| mask_data[r * cols + c] != 0)
            .map(|c| [c, r])
            .collect()
    });

    Ok(LocalMaxima {
        points,
        mask,
        max_response,
        threshold,
    })
}

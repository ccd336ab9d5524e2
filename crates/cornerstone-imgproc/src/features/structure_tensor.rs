use cornerstone_image::{Image, ImageError};

use super::gradients::CORNER_PADDING;
use crate::filter::{blur_with_kernel, FilterError};
use crate::parallel::{for_each_row_mut, ExecutionStrategy};

/// The per-pixel second-moment matrix `[[a, b], [b, c]]` of an image.
///
/// Each field holds the gaussian-windowed products of the gradients:
/// `a = w * (Ix * Ix)`, `b = w * (Ix * Iy)` and `c = w * (Iy * Iy)`.
/// `a` and `c` are never negative.
#[derive(Clone, Debug, PartialEq)]
pub struct StructureTensor {
    /// Windowed `Ix * Ix`.
    pub a: Image<f32, 1>,
    /// Windowed `Ix * Iy`.
    pub b: Image<f32, 1>,
    /// Windowed `Iy * Iy`.
    pub c: Image<f32, 1>,
}

impl StructureTensor {
    /// Build the structure tensor from gradient images.
    ///
    /// # Arguments
    ///
    /// * `dx` - The horizontal gradient.
    /// * `dy` - The vertical gradient, same size as `dx`.
    /// * `window_kernel` - The 1-D gaussian window, applied along both axes.
    /// * `strategy` - The execution strategy.
    pub fn from_gradients(
        dx: &Image<f32, 1>,
        dy: &Image<f32, 1>,
        window_kernel: &[f32],
        strategy: ExecutionStrategy,
    ) -> Result<Self, FilterError> {
        if dx.size() != dy.size() {
            return Err(ImageError::InvalidImageSize(
                dy.width(),
                dy.height(),
                dx.width(),
                dx.height(),
            )
            .into());
        }

        let size = dx.size();
        let cols = size.width;
        let (dx_data, dy_data) = (dx.as_slice(), dy.as_slice());

        let mut dx2 = Image::from_size_val(size, 0.0f32)?;
        let mut dxy = Image::from_size_val(size, 0.0f32)?;
        let mut dy2 = Image::from_size_val(size, 0.0f32)?;

        for_each_row_mut(strategy, dx2.as_slice_mut(), cols, |r, row| {
            let off = r * cols;
            row.iter_mut()
                .zip(&dx_data[off..off + cols])
                .for_each(|(p, &gx)| *p = gx * gx);
        });
        for_each_row_mut(strategy, dxy.as_slice_mut(), cols, |r, row| {
            let off = r * cols;
            row.iter_mut()
                .zip(&dx_data[off..off + cols])
                .zip(&dy_data[off..off + cols])
                .for_each(|((p, &gx), &gy)| *p = gx * gy);
        });
        for_each_row_mut(strategy, dy2.as_slice_mut(), cols, |r, row| {
            let off = r * cols;
            row.iter_mut()
                .zip(&dy_data[off..off + cols])
                .for_each(|(p, &gy)| *p = gy * gy);
        });

        let mut a = Image::from_size_val(size, 0.0f32)?;
        let mut b = Image::from_size_val(size, 0.0f32)?;
        let mut c = Image::from_size_val(size, 0.0f32)?;

        blur_with_kernel(&dx2, &mut a, window_kernel, CORNER_PADDING, strategy)?;
        blur_with_kernel(&dxy, &mut b, window_kernel, CORNER_PADDING, strategy)?;
        blur_with_kernel(&dy2, &mut c, window_kernel, CORNER_PADDING, strategy)?;

        Ok(Self { a, b, c })
    }

    /// The tensor entries `(a, b, c)` at pixel `(x, y)`.
    pub fn at(&self, x: usize, y: usize) -> Result<(f32, f32, f32), ImageError> {
        Ok((
            self.a.get_pixel(x, y, 0)?,
            self.b.get_pixel(x, y, 0)?,
            self.c.get_pixel(x, y, 0)?,
        ))
    }
}

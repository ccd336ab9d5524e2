use cornerstone_image::Image;

use super::{
    corner_response, select_local_maxima, spatial_gradient_gaussian, CornerDetectorError,
    CornerMetric, KeyPoint, LocalMaxima, LogViewer, StageViewer, StructureTensor,
};
use crate::filter::{kernels, FloatConversion};
use crate::morphology::Kernel;
use crate::parallel::ExecutionStrategy;

/// Ratio between the reported keypoint size and the window sigma.
pub const KEYPOINT_SIZE_FACTOR: f32 = 3.0;

/// Configuration of a [`CornerDetector`].
///
/// # Examples
///
/// ```
/// use cornerstone_imgproc::features::{CornerDetectorConfig, CornerMetric};
///
/// let config = CornerDetectorConfig::default()
///     .with_metric(CornerMetric::HarmonicMean)
///     .with_window_sigma(3.0);
///
/// assert_eq!(config.metric, CornerMetric::HarmonicMean);
/// assert_eq!(config.gradient_sigma, 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CornerDetectorConfig {
    /// The corner response metric.
    pub metric: CornerMetric,
    /// Feed the intermediate images to a [`StageViewer`].
    pub visualize: bool,
    /// Fraction of the strongest response used as detection threshold, in (0, 1].
    pub quality_level: f32,
    /// Sigma of the gaussian used to estimate the gradients.
    pub gradient_sigma: f32,
    /// Sigma of the gaussian window aggregating the gradient products.
    pub window_sigma: f32,
    /// How the per-pixel work is scheduled.
    pub execution: ExecutionStrategy,
}

impl Default for CornerDetectorConfig {
    fn default() -> Self {
        Self {
            metric: CornerMetric::Harris,
            visualize: false,
            quality_level: 0.01,
            gradient_sigma: 1.0,
            window_sigma: 2.0,
            execution: ExecutionStrategy::Serial,
        }
    }
}

impl CornerDetectorConfig {
    /// Set the corner response metric.
    pub fn with_metric(mut self, metric: CornerMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Enable or disable the stage viewer.
    pub fn with_visualize(mut self, visualize: bool) -> Self {
        self.visualize = visualize;
        self
    }

    /// Set the quality level.
    pub fn with_quality_level(mut self, quality_level: f32) -> Self {
        self.quality_level = quality_level;
        self
    }

    /// Set the gradient sigma.
    pub fn with_gradient_sigma(mut self, gradient_sigma: f32) -> Self {
        self.gradient_sigma = gradient_sigma;
        self
    }

    /// Set the window sigma.
    pub fn with_window_sigma(mut self, window_sigma: f32) -> Self {
        self.window_sigma = window_sigma;
        self
    }

    /// Set the execution strategy.
    pub fn with_execution(mut self, execution: ExecutionStrategy) -> Self {
        self.execution = execution;
        self
    }
}

/// Structure-tensor corner detector.
///
/// The kernels are built once in [`CornerDetector::new`]; [`CornerDetector::detect`]
/// only reads them, so one detector can serve several threads at once.
#[derive(Clone, Debug)]
pub struct CornerDetector {
    config: CornerDetectorConfig,
    g_kernel: Vec<f32>,
    dg_kernel: Vec<f32>,
    win_kernel: Vec<f32>,
    nms_kernel: Kernel,
}

impl CornerDetector {
    /// Create a detector from its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a sigma is not finite and positive or exceeds 1024, or if
    /// the quality level lies outside (0, 1].
    pub fn new(config: CornerDetectorConfig) -> Result<Self, CornerDetectorError> {
        let q = config.quality_level;
        if !(q > 0.0 && q <= 1.0) {
            return Err(CornerDetectorError::InvalidQualityLevel(q));
        }

        let g_kernel = kernels::gaussian_kernel_1d_from_sigma(config.gradient_sigma)?;
        let dg_kernel = kernels::gaussian_derivative_kernel_1d_from_sigma(config.gradient_sigma)?;
        let win_kernel = kernels::gaussian_kernel_1d_from_sigma(config.window_sigma)?;

        log::debug!(
            "corner detector: metric={} gradient kernel={} window kernel={} parallel={}",
            config.metric,
            g_kernel.len(),
            win_kernel.len(),
            config.execution.is_parallel()
        );

        Ok(Self {
            config,
            g_kernel,
            dg_kernel,
            win_kernel,
            nms_kernel: Kernel::default(),
        })
    }

    /// The configuration of the detector.
    pub fn config(&self) -> &CornerDetectorConfig {
        &self.config
    }

    /// The gaussian kernel used for the gradients.
    pub fn smoothing_kernel(&self) -> &[f32] {
        &self.g_kernel
    }

    /// The derivative of gaussian kernel used for the gradients.
    pub fn derivative_kernel(&self) -> &[f32] {
        &self.dg_kernel
    }

    /// The gaussian window of the structure tensor.
    pub fn window_kernel(&self) -> &[f32] {
        &self.win_kernel
    }

    /// The size given to every detected keypoint.
    pub fn keypoint_size(&self) -> f32 {
        KEYPOINT_SIZE_FACTOR * self.config.window_sigma
    }

    /// Detect corners in a grayscale image.
    ///
    /// When `visualize` is set, the stages are summarized through a [`LogViewer`].
    ///
    /// # Arguments
    ///
    /// * `src` - The source image with shape (H, W).
    ///
    /// # Returns
    ///
    /// The keypoints in row-major order.
    pub fn detect<T>(&self, src: &Image<T, 1>) -> Result<Vec<KeyPoint>, CornerDetectorError>
    where
        T: FloatConversion + Sync,
    {
        self.detect_with_viewer(src, &mut LogViewer)
    }

    /// Detect corners, sending the intermediate images to `viewer` when `visualize` is set.
    ///
    /// The viewer receives, in order: "Gradient Ix", "Gradient Iy", "Image A",
    /// "Image B", "Image C", "Response" (scaled by `1 / (0.9 * max)`) and "Local max"
    /// (1 at every keypoint). Viewer errors are logged and ignored.
    pub fn detect_with_viewer<T>(
        &self,
        src: &Image<T, 1>,
        viewer: &mut dyn StageViewer,
    ) -> Result<Vec<KeyPoint>, CornerDetectorError>
    where
        T: FloatConversion + Sync,
    {
        let strategy = self.config.execution;
        let size = src.size();

        // gradients
        let mut dx = Image::from_size_val(size, 0.0f32)?;
        let mut dy = Image::from_size_val(size, 0.0f32)?;
        spatial_gradient_gaussian(
            src,
            &mut dx,
            &mut dy,
            &self.g_kernel,
            &self.dg_kernel,
            strategy,
        )?;

        // windowed second moments
        let tensor = StructureTensor::from_gradients(&dx, &dy, &self.win_kernel, strategy)?;

        let mut response = Image::from_size_val(size, 0.0f32)?;
        corner_response(&tensor, self.config.metric, &mut response, strategy)?;

        let maxima = select_local_maxima(
            &response,
            self.config.quality_level,
            &self.nms_kernel,
            strategy,
        )?;

        let keypoint_size = self.keypoint_size();
        let resp = response.as_slice();
        let keypoints = maxima
            .points
            .iter()
            .map(|&[x, y]| {
                KeyPoint::new(
                    x as f32,
                    y as f32,
                    keypoint_size,
                    resp[y * size.width + x],
                )
            })
            .collect::<Vec<_>>();

        log::debug!(
            "detected {} corners in {} (max response {:.6e}, threshold {:.6e})",
            keypoints.len(),
            size,
            maxima.max_response,
            maxima.threshold
        );

        if self.config.visualize {
            show_stages(viewer, &dx, &dy, &tensor, &response, &maxima);
        }

        Ok(keypoints)
    }
}

fn show_stages(
    viewer: &mut dyn StageViewer,
    dx: &Image<f32, 1>,
    dy: &Image<f32, 1>,
    tensor: &StructureTensor,
    response: &Image<f32, 1>,
    maxima: &LocalMaxima,
) {
    let mut show = |name: &str, stage: &Image<f32, 1>| {
        if let Err(err) = viewer.show(name, stage) {
            log::warn!("failed to show stage `{name}`: {err}");
        }
    };

    show("Gradient Ix", dx);
    show("Gradient Iy", dy);
    show("Image A", &tensor.a);
    show("Image B", &tensor.b);
    show("Image C", &tensor.c);

    let scale = if maxima.max_response > 0.0 {
        1.0 / (0.9 * maxima.max_response)
    } else {
        1.0
    };
    let scaled: Vec<f32> = response.as_slice().iter().map(|&v| v * scale).collect();
    match Image::<f32, 1>::new(response.size(), scaled) {
        Ok(scaled) => show("Response", &scaled),
        Err(err) => log::warn!("failed to scale the response: {err}"),
    }

    let mask: Vec<f32> = maxima.mask.as_slice().iter().map(|&m| m as f32).collect();
    match Image::<f32, 1>::new(maxima.mask.size(), mask) {
        Ok(mask) => show("Local max", &mask),
        Err(err) => log::warn!("failed to convert the local max mask: {err}"),
    }
}

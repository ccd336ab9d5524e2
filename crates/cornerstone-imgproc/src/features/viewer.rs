use cornerstone_image::Image;

/// Error returned by a [`StageViewer`].
pub type ViewerError = Box<dyn std::error::Error + Send + Sync>;

/// A sink for the intermediate images of the corner detector.
///
/// Viewers are a debugging aid: the detector logs their errors and carries on,
/// so a failing viewer never changes the detected keypoints.
pub trait StageViewer {
    /// Show one named stage of the pipeline.
    fn show(&mut self, name: &str, stage: &Image<f32, 1>) -> Result<(), ViewerError>;
}

/// A [`StageViewer`] writing a summary of every stage to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogViewer;

impl StageViewer for LogViewer {
    fn show(&mut self, name: &str, stage: &Image<f32, 1>) -> Result<(), ViewerError> {
        let data = stage.as_slice();
        let (min, max) = data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let mean = data.iter().map(|&v| v as f64).sum::<f64>() / data.len() as f64;

        log::debug!(
            "{name}: {}x{} min={min:.6} max={max:.6} mean={mean:.6}",
            stage.width(),
            stage.height()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_viewer_accepts_any_stage() -> Result<(), ViewerError> {
        let stage = Image::<f32, 1>::new([3, 1].into(), vec![-1.0, 0.0, 4.0])?;
        LogViewer.show("Stage", &stage)?;
        Ok(())
    }
}

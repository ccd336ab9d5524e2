/// A corner detected in an image.
///
/// Keypoints are plain values produced by [`crate::features::CornerDetector::detect`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyPoint {
    /// The x-coordinate (column) of the corner in pixels.
    pub x: f32,
    /// The y-coordinate (row) of the corner in pixels.
    pub y: f32,
    /// The diameter of the meaningful neighborhood, 3 * window sigma. Display only.
    pub size: f32,
    /// The orientation of the keypoint. Corners carry no orientation.
    pub angle: Option<f32>,
    /// The corner response at the keypoint.
    pub response: f32,
}

impl KeyPoint {
    /// Creates a keypoint without orientation.
    pub fn new(x: f32, y: f32, size: f32, response: f32) -> Self {
        Self {
            x,
            y,
            size,
            angle: None,
            response,
        }
    }
}

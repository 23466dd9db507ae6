//! Facial landmark types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A landmark in normalized frame coordinates (0.0 to 1.0 on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedPoint {
    /// Horizontal position (0.0 = left, 1.0 = right)
    pub x: f32,
    /// Vertical position (0.0 = top, 1.0 = bottom)
    pub y: f32,
}

impl NormalizedPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Map to pixel coordinates for a frame of the given size.
    #[inline]
    pub fn to_pixels(&self, width: u32, height: u32) -> (f32, f32) {
        (self.x * width as f32, self.y * height as f32)
    }
}

/// The ordered landmark set of one detected face in one frame.
///
/// The detector always returns the same number of points in the same order,
/// so indices are stable across frames and faces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FaceLandmarks {
    points: Vec<NormalizedPoint>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<NormalizedPoint>) -> Self {
        Self { points }
    }

    /// Build a landmark set of `len` points all located at `fill`.
    pub fn filled(len: usize, fill: NormalizedPoint) -> Self {
        Self {
            points: vec![fill; len],
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<NormalizedPoint> {
        self.points.get(index).copied()
    }

    /// Overwrite a single point. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, point: NormalizedPoint) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }

    /// Horizontal position of the reference landmark used to tell players apart.
    pub fn reference_x(&self, index: usize) -> Option<f32> {
        self.get(index).map(|p| p.x)
    }
}

impl From<Vec<NormalizedPoint>> for FaceLandmarks {
    fn from(points: Vec<NormalizedPoint>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixels_scales_by_frame_size() {
        let p = NormalizedPoint::new(0.25, 0.5);
        assert_eq!(p.to_pixels(640, 480), (160.0, 240.0));
    }

    #[test]
    fn test_landmarks_serialize_as_plain_array() {
        let lm = FaceLandmarks::new(vec![NormalizedPoint::new(0.1, 0.2)]);
        let json = serde_json::to_string(&lm).unwrap();
        assert_eq!(json, r#"[{"x":0.1,"y":0.2}]"#);

        let back: FaceLandmarks = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lm);
    }

    #[test]
    fn test_set_ignores_out_of_range() {
        let mut lm = FaceLandmarks::filled(3, NormalizedPoint::default());
        lm.set(7, NormalizedPoint::new(1.0, 1.0));
        lm.set(1, NormalizedPoint::new(0.5, 0.5));
        assert_eq!(lm.len(), 3);
        assert_eq!(lm.reference_x(1), Some(0.5));
        assert_eq!(lm.reference_x(7), None);
    }
}

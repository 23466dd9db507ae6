use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle, inclusive of `(x0, y0)` and exclusive of `(x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Bounding box of floating-point extents, grown outward to whole pixels
    /// and clamped to a `width` x `height` frame.
    pub fn from_extents(
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
        width: u32,
        height: u32,
    ) -> Self {
        let x0 = min_x.floor().max(0.0) as u32;
        let y0 = min_y.floor().max(0.0) as u32;
        let x1 = max_x.ceil().min(width as f32).max(0.0) as u32;
        let y1 = max_y.ceil().min(height as f32).max(0.0) as u32;
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// True when the rectangle covers no pixel at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extents_rounds_outward() {
        let r = PixelRect::from_extents(10.4, 20.6, 30.2, 40.0, 640, 480);
        assert_eq!(r, PixelRect::new(10, 20, 31, 40));
        assert_eq!(r.width(), 21);
        assert_eq!(r.height(), 20);
        assert_eq!(r.area(), 420);
    }

    #[test]
    fn test_from_extents_clamps_to_frame() {
        let r = PixelRect::from_extents(-5.0, -3.0, 700.0, 500.0, 640, 480);
        assert_eq!(r, PixelRect::new(0, 0, 640, 480));
    }

    #[test]
    fn test_off_frame_extents_are_empty() {
        let r = PixelRect::from_extents(650.0, 10.0, 660.0, 20.0, 640, 480);
        assert!(r.is_empty());
        assert_eq!(r.area(), 0);
    }

    #[test]
    fn test_collapsed_extents_are_empty() {
        let r = PixelRect::from_extents(100.0, 100.0, 100.0, 100.0, 640, 480);
        assert!(r.is_empty());
    }
}

//! Reusable mouth mask buffer.
//!
//! The frame loop owns one [`MaskScratch`] and rasterizes every face's mouth
//! polygon into it. The buffer is resized to the ROI and cleared on each use,
//! so nothing from a previous face or frame can leak into the next one.

use tswitch_models::PixelRect;

use crate::mouth_region::MouthPolygon;

/// Pooled mask storage, one flag per ROI pixel.
#[derive(Debug, Default)]
pub struct MaskScratch {
    cells: Vec<bool>,
}

impl MaskScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the mask for `polygon` over `roi` and return a view of it.
    ///
    /// Pixel `(x, y)` is tested at its integer coordinate.
    pub fn rasterize(&mut self, polygon: &MouthPolygon, roi: PixelRect) -> MouthMask<'_> {
        self.cells.clear();
        self.cells.resize(roi.area(), false);

        let width = roi.width() as usize;
        let mut inside = 0usize;
        for y in roi.y0..roi.y1 {
            let row = (y - roi.y0) as usize * width;
            for x in roi.x0..roi.x1 {
                if polygon.contains(x as f32, y as f32) {
                    self.cells[row + (x - roi.x0) as usize] = true;
                    inside += 1;
                }
            }
        }

        MouthMask {
            cells: &self.cells,
            roi,
            inside,
        }
    }
}

/// Filled mouth mask over a ROI, borrowed from a [`MaskScratch`].
#[derive(Debug)]
pub struct MouthMask<'a> {
    cells: &'a [bool],
    roi: PixelRect,
    inside: usize,
}

impl MouthMask<'_> {
    /// Number of ROI pixels inside the mouth.
    pub fn inside_count(&self) -> usize {
        self.inside
    }

    /// Whether frame pixel `(x, y)` lies inside the mouth.
    #[inline]
    pub fn is_inside(&self, x: u32, y: u32) -> bool {
        if !self.roi.contains(x, y) {
            return false;
        }
        let idx = (y - self.roi.y0) as usize * self.roi.width() as usize + (x - self.roi.x0) as usize;
        self.cells[idx]
    }

    /// Frame coordinates of every pixel inside the mouth, row by row.
    pub fn inside_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let roi = self.roi;
        (roi.y0..roi.y1)
            .flat_map(move |y| (roi.x0..roi.x1).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.is_inside(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> MouthPolygon {
        MouthPolygon::new(vec![(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)])
    }

    #[test]
    fn test_rasterize_counts_inside_pixels() {
        let mut scratch = MaskScratch::new();
        let mask = scratch.rasterize(&square(), PixelRect::new(2, 2, 6, 6));
        // Integer samples on the top/left edge count, bottom/right do not
        assert_eq!(mask.inside_count(), 16);
        assert!(mask.is_inside(3, 3));
        assert!(!mask.is_inside(7, 7));
        assert_eq!(mask.inside_pixels().count(), 16);
    }

    #[test]
    fn test_rasterize_empty_roi() {
        let mut scratch = MaskScratch::new();
        let mask = scratch.rasterize(&square(), PixelRect::new(4, 4, 4, 4));
        assert_eq!(mask.inside_count(), 0);
        assert_eq!(mask.inside_pixels().count(), 0);
    }

    #[test]
    fn test_scratch_is_cleared_between_uses() {
        let mut scratch = MaskScratch::new();
        let roi = PixelRect::new(0, 0, 8, 8);
        assert!(scratch.rasterize(&square(), roi).inside_count() > 0);

        let far = MouthPolygon::new(vec![(20.0, 20.0), (30.0, 20.0), (30.0, 30.0)]);
        let mask = scratch.rasterize(&far, roi);
        assert_eq!(mask.inside_count(), 0);
        assert!(!mask.is_inside(3, 3));
        assert!(scratch.cells.capacity() >= 64);
    }
}

//! Mouth openness and tongue fraction measurement.

use image::RgbImage;
use tswitch_models::{FaceLandmarks, PixelRect};

use crate::color::TongueColorRule;
use crate::error::{VisionError, VisionResult};
use crate::mask::MaskScratch;
use crate::mouth_region::MouthRegion;

/// Vertical gap between the upper and lower inner-lip landmarks, in pixels.
pub fn open_px(
    landmarks: &FaceLandmarks,
    upper: usize,
    lower: usize,
    frame_height: u32,
) -> VisionResult<f32> {
    let lookup = |index: usize| {
        landmarks.get(index).ok_or(VisionError::InvalidLandmarks {
            index,
            len: landmarks.len(),
        })
    };
    let top = lookup(upper)?;
    let bottom = lookup(lower)?;
    let h = frame_height as f32;
    Ok((bottom.y * h - top.y * h).abs())
}

/// Pixel tallies from one mouth scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TongueCount {
    pub mouth_px: usize,
    pub tongue_px: usize,
}

impl TongueCount {
    /// Tongue share of the mouth. An empty mouth counts as one pixel.
    pub fn fraction(&self) -> f32 {
        self.tongue_px as f32 / self.mouth_px.max(1) as f32
    }
}

/// Count mouth and tongue pixels of `region` in `frame`.
///
/// Only pixels inside the clamped ROI are visited and the frame is never
/// written to. A degenerate region yields an empty count.
pub fn count_tongue_pixels(
    frame: &RgbImage,
    region: &MouthRegion,
    scratch: &mut MaskScratch,
    rule: &TongueColorRule,
) -> TongueCount {
    let roi = clamp_to_frame(region.roi, frame);
    if roi.is_empty() {
        return TongueCount::default();
    }

    let mask = scratch.rasterize(&region.polygon, roi);
    let mut count = TongueCount {
        mouth_px: mask.inside_count(),
        tongue_px: 0,
    };
    for (x, y) in mask.inside_pixels() {
        if rule.matches(frame.get_pixel(x, y).0) {
            count.tongue_px += 1;
        }
    }
    count
}

/// Tongue share of the visible mouth, in `[0, 1]`.
pub fn tongue_fraction(
    frame: &RgbImage,
    region: &MouthRegion,
    scratch: &mut MaskScratch,
    rule: &TongueColorRule,
) -> f32 {
    count_tongue_pixels(frame, region, scratch, rule).fraction()
}

fn clamp_to_frame(roi: PixelRect, frame: &RgbImage) -> PixelRect {
    PixelRect::new(
        roi.x0,
        roi.y0,
        roi.x1.min(frame.width()),
        roi.y1.min(frame.height()),
    )
}

//! Per-face analysis: region, metrics, decision.

use image::RgbImage;
use tswitch_models::{FaceLandmarks, FrameMetrics, PixelRect};

use crate::classifier::GestureThresholds;
use crate::color::TongueColorRule;
use crate::config::GestureConfig;
use crate::error::{VisionError, VisionResult};
use crate::estimator::{count_tongue_pixels, open_px};
use crate::mask::MaskScratch;
use crate::mouth_region::{LipBounds, MouthRegion};

/// Result of analyzing one face on one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceAnalysis {
    pub bounds: LipBounds,
    pub roi: PixelRect,
    pub metrics: FrameMetrics,
    pub tongue_out: bool,
}

/// Runs region extraction, measurement and classification for one face.
#[derive(Debug, Clone)]
pub struct FaceAnalyzer {
    inner_lip: Vec<usize>,
    max_index: usize,
    upper_lip: usize,
    lower_lip: usize,
    color_rule: TongueColorRule,
    thresholds: GestureThresholds,
}

impl FaceAnalyzer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            inner_lip: config.inner_lip_landmarks.clone(),
            max_index: config.max_landmark_index(),
            upper_lip: config.upper_lip_landmark,
            lower_lip: config.lower_lip_landmark,
            color_rule: config.color_rule,
            thresholds: config.thresholds(),
        }
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Analyze `landmarks` against `frame`.
    ///
    /// Fails only when the landmark set is too short; a closed or off-frame
    /// mouth is a valid "no tongue" result.
    pub fn analyze(
        &self,
        frame: &RgbImage,
        landmarks: &FaceLandmarks,
        scratch: &mut MaskScratch,
    ) -> VisionResult<FaceAnalysis> {
        if landmarks.len() <= self.max_index {
            return Err(VisionError::InvalidLandmarks {
                index: self.max_index,
                len: landmarks.len(),
            });
        }

        let (width, height) = frame.dimensions();
        let region = MouthRegion::extract(landmarks, &self.inner_lip, width, height)?;
        let open = open_px(landmarks, self.upper_lip, self.lower_lip, height)?;

        let fraction = if region.is_degenerate() {
            0.0
        } else {
            count_tongue_pixels(frame, &region, scratch, &self.color_rule).fraction()
        };

        let metrics = FrameMetrics::new(open, fraction);
        Ok(FaceAnalysis {
            bounds: region.bounds,
            roi: region.roi,
            tongue_out: self.thresholds.is_tongue_out(&metrics),
            metrics,
        })
    }
}

//! Tongue-out decision from frame metrics.

use serde::{Deserialize, Serialize};
use tswitch_models::FrameMetrics;

/// Thresholds a face must clear to count as "tongue out".
///
/// Both are required: an open mouth showing only teeth fails the fraction
/// check, and red lips on a closed mouth fail the openness check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Minimum inner-lip gap in pixels (default: 8)
    pub min_open_px: f32,
    /// Minimum tongue share of the mouth (default: 0.06)
    pub frac_threshold: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            min_open_px: 8.0,
            frac_threshold: 0.06,
        }
    }
}

impl GestureThresholds {
    #[inline]
    pub fn is_tongue_out(&self, metrics: &FrameMetrics) -> bool {
        metrics.open_px >= self.min_open_px && metrics.tongue_fraction >= self.frac_threshold
    }
}

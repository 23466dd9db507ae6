//! Tongue color classification in HSV space.
//!
//! Tongues sit in the red hue band, which wraps around 0°. Saturation and
//! value floors reject washed-out skin, teeth and shadow.

use serde::{Deserialize, Serialize};

/// HSV color: hue in degrees `[0, 360)`, saturation and value in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// Convert an 8-bit RGB triple to HSV.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let s = if max == 0.0 { 0.0 } else { d / max };

    let h = if d == 0.0 {
        0.0
    } else if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsv {
        h: h / 6.0 * 360.0,
        s: s * 100.0,
        v: max * 100.0,
    }
}

/// Rule deciding whether a pixel is tongue-colored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TongueColorRule {
    /// Upper bound of the low red band `[0, low_hue_max]` (degrees)
    pub low_hue_max: f32,
    /// Lower bound of the high red band `[high_hue_min, 360]` (degrees)
    pub high_hue_min: f32,
    /// Saturation must be strictly above this (percent)
    pub min_saturation: f32,
    /// Value must be strictly above this (percent)
    pub min_value: f32,
}

impl Default for TongueColorRule {
    fn default() -> Self {
        Self {
            low_hue_max: 12.0,
            high_hue_min: 340.0,
            min_saturation: 40.0,
            min_value: 50.0,
        }
    }
}

impl TongueColorRule {
    #[inline]
    pub fn matches_hsv(&self, hsv: Hsv) -> bool {
        let red = (hsv.h >= 0.0 && hsv.h <= self.low_hue_max)
            || (hsv.h >= self.high_hue_min && hsv.h <= 360.0);
        red && hsv.s > self.min_saturation && hsv.v > self.min_value
    }

    #[inline]
    pub fn matches(&self, rgb: [u8; 3]) -> bool {
        self.matches_hsv(rgb_to_hsv(rgb[0], rgb[1], rgb[2]))
    }
}

/// Classify a pixel with the default rule.
#[inline]
pub fn is_tongue_colored(rgb: [u8; 3]) -> bool {
    TongueColorRule::default().matches(rgb)
}

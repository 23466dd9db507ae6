//! Mouth region extraction from inner-lip landmarks.
//!
//! The inner-lip contour of the 468-point face mesh is walked in a fixed
//! order and closed back to its first point. The resulting polygon is filled
//! with the non-zero winding rule, like a canvas path.

use tswitch_models::{FaceLandmarks, PixelRect};

use crate::error::{VisionError, VisionResult};

/// Inner-lip contour indices in face mesh order. The order is the winding.
pub const INNER_LIP_LANDMARKS: [usize; 20] = [
    78, 191, 80, 81, 82, 13, 312, 311, 310, 415, 308, 324, 318, 402, 317, 14, 87, 178, 88, 95,
];

/// Upper inner-lip midpoint.
pub const UPPER_INNER_LIP: usize = 13;

/// Lower inner-lip midpoint.
pub const LOWER_INNER_LIP: usize = 14;

/// Closed polygon in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MouthPolygon {
    points: Vec<(f32, f32)>,
}

impl MouthPolygon {
    pub fn new(points: Vec<(f32, f32)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    /// Non-zero winding test for the point `(px, py)`.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        if self.points.len() < 3 {
            return false;
        }

        let mut winding = 0i32;
        let n = self.points.len();
        for i in 0..n {
            let (ax, ay) = self.points[i];
            let (bx, by) = self.points[(i + 1) % n];
            let side = (bx - ax) * (py - ay) - (px - ax) * (by - ay);

            if ay <= py {
                if by > py && side > 0.0 {
                    winding += 1;
                }
            } else if by <= py && side < 0.0 {
                winding -= 1;
            }
        }
        winding != 0
    }
}

/// Unclamped extents of the lip points in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LipBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

/// Mouth polygon plus its clamped bounding box for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MouthRegion {
    pub polygon: MouthPolygon,
    pub bounds: LipBounds,
    pub roi: PixelRect,
}

impl MouthRegion {
    /// Map the contour landmarks to pixels and box them.
    ///
    /// Fails only when the landmark set is too short for one of `indices`.
    pub fn extract(
        landmarks: &FaceLandmarks,
        indices: &[usize],
        width: u32,
        height: u32,
    ) -> VisionResult<Self> {
        let mut points = Vec::with_capacity(indices.len());
        for &index in indices {
            let point = landmarks.get(index).ok_or(VisionError::InvalidLandmarks {
                index,
                len: landmarks.len(),
            })?;
            points.push(point.to_pixels(width, height));
        }

        let bounds = points.iter().fold(
            LipBounds {
                min_x: f32::INFINITY,
                min_y: f32::INFINITY,
                max_x: f32::NEG_INFINITY,
                max_y: f32::NEG_INFINITY,
            },
            |b, &(x, y)| LipBounds {
                min_x: b.min_x.min(x),
                min_y: b.min_y.min(y),
                max_x: b.max_x.max(x),
                max_y: b.max_y.max(y),
            },
        );

        let roi = if points.is_empty() {
            PixelRect::default()
        } else {
            PixelRect::from_extents(
                bounds.min_x,
                bounds.min_y,
                bounds.max_x,
                bounds.max_y,
                width,
                height,
            )
        };

        Ok(Self {
            polygon: MouthPolygon::new(points),
            bounds,
            roi,
        })
    }

    /// True when there is no visible mouth to scan.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.roi.is_empty()
    }
}

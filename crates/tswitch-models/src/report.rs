//! Per-frame measurements and published gesture state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::channel::{Channel, PlayerMode};
use crate::rect::PixelRect;

/// Measurements taken from one face in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FrameMetrics {
    /// Vertical gap between the inner-lip midpoints, in pixels
    pub open_px: f32,
    /// Share of visible mouth pixels that look like tongue (0.0 to 1.0)
    pub tongue_fraction: f32,
}

impl FrameMetrics {
    pub const ZERO: FrameMetrics = FrameMetrics {
        open_px: 0.0,
        tongue_fraction: 0.0,
    };

    pub fn new(open_px: f32, tongue_fraction: f32) -> Self {
        Self {
            open_px,
            tongue_fraction,
        }
    }
}

/// Result of analysing a single face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceReport {
    /// Channel this face drove, `None` when it was not assigned
    pub channel: Option<Channel>,
    /// Mouth bounding box in pixel space
    pub roi: PixelRect,
    pub metrics: FrameMetrics,
    pub tongue_out: bool,
}

/// Latest gesture levels, published after every processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct GestureSnapshot {
    pub mode: PlayerMode,
    /// Timestamp of the frame these levels were computed from
    pub frame_timestamp_ms: Option<u64>,
    /// Level per channel, indexed by [`Channel::index`]
    pub tongue_out: [bool; 2],
}

impl GestureSnapshot {
    pub fn new(mode: PlayerMode) -> Self {
        Self {
            mode,
            frame_timestamp_ms: None,
            tongue_out: [false; 2],
        }
    }

    #[inline]
    pub fn tongue_out(&self, channel: Channel) -> bool {
        self.tongue_out[channel.index()]
    }
}

/// Everything computed for one processed frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FrameReport {
    pub timestamp_ms: u64,
    pub faces_detected: usize,
    pub faces: Vec<FaceReport>,
    pub snapshot: GestureSnapshot,
}

impl FrameReport {
    /// Report of the face that drove `channel` in this frame, if any.
    pub fn face_for(&self, channel: Channel) -> Option<&FaceReport> {
        self.faces.iter().find(|f| f.channel == Some(channel))
    }
}

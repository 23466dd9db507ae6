//! Gesture pipeline metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the host
//! installs a recorder.

use metrics::{counter, gauge, histogram};
use tswitch_models::Channel;

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Frames analyzed.
    pub const FRAMES_PROCESSED_TOTAL: &str = "tswitch_frames_processed_total";

    /// Ticks skipped because the frame timestamp did not advance.
    pub const FRAMES_DUPLICATE_TOTAL: &str = "tswitch_frames_duplicate_total";

    /// Ticks skipped because the camera had no frame yet.
    pub const FRAMES_NOT_READY_TOTAL: &str = "tswitch_frames_not_ready_total";

    /// Per-frame detector failures absorbed by the loop.
    pub const DETECTION_ERRORS_TOTAL: &str = "tswitch_detection_errors_total";

    /// Faces dropped because their landmark set was unusable.
    pub const INVALID_FACES_TOTAL: &str = "tswitch_invalid_faces_total";

    /// Rising edges consumed, by channel.
    pub const RISING_EDGES_TOTAL: &str = "tswitch_rising_edges_total";

    /// Faces found in the latest frame.
    pub const FACES_DETECTED: &str = "tswitch_faces_detected";

    /// Tongue fraction per analyzed face, by channel.
    pub const TONGUE_FRACTION: &str = "tswitch_tongue_fraction";

    /// Time spent processing one frame, in seconds.
    pub const FRAME_LATENCY_SECONDS: &str = "tswitch_frame_latency_seconds";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record a processed frame.
pub fn record_frame(faces_detected: usize, latency_ms: f64) {
    counter!(names::FRAMES_PROCESSED_TOTAL).increment(1);
    gauge!(names::FACES_DETECTED).set(faces_detected as f64);
    histogram!(names::FRAME_LATENCY_SECONDS).record(latency_ms / 1000.0);
}

pub fn record_duplicate_frame() {
    counter!(names::FRAMES_DUPLICATE_TOTAL).increment(1);
}

pub fn record_not_ready_frame() {
    counter!(names::FRAMES_NOT_READY_TOTAL).increment(1);
}

pub fn record_detection_error() {
    counter!(names::DETECTION_ERRORS_TOTAL).increment(1);
}

pub fn record_invalid_face() {
    counter!(names::INVALID_FACES_TOTAL).increment(1);
}

/// Record the tongue fraction measured for a face.
pub fn record_tongue_fraction(channel: Option<Channel>, fraction: f32) {
    histogram!(
        names::TONGUE_FRACTION,
        "channel" => channel_label(channel)
    )
    .record(fraction as f64);
}

pub fn record_rising_edge(channel: Channel) {
    counter!(
        names::RISING_EDGES_TOTAL,
        "channel" => channel_label(Some(channel))
    )
    .increment(1);
}

fn channel_label(channel: Option<Channel>) -> String {
    channel.map_or_else(|| "none".to_string(), |ch| ch.to_string())
}

// =============================================================================
// Tests
// =============================================================================

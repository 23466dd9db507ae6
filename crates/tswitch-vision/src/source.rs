//! Upstream seams: camera frames and face landmark detection.
//!
//! The session never talks to a camera or a model directly. A
//! [`CameraOpener`] produces a [`FrameSource`] and a [`DetectorLoader`]
//! produces a [`LandmarkDetector`]; both may take a while (permission
//! prompts, model downloads) so they are async. Per-frame calls are
//! synchronous and must return promptly.

use async_trait::async_trait;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use tswitch_models::FaceLandmarks;

use crate::error::VisionResult;

/// Resolution hint for the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraRequest {
    pub width: u32,
    pub height: u32,
}

impl Default for CameraRequest {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Options the landmark detector is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorOptions {
    /// Upper bound on faces returned per frame
    pub max_faces: usize,
    /// Frames arrive as a monotonic video stream
    pub video_mode: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            max_faces: 1,
            video_mode: true,
        }
    }
}

/// A live stream of video frames.
pub trait FrameSource: Send {
    /// Current frame dimensions, or `None` while the stream has no frame yet.
    fn frame_size(&self) -> Option<(u32, u32)>;

    /// Timestamp of the frame [`FrameSource::capture`] would return now.
    fn current_timestamp_ms(&self) -> Option<u64>;

    /// Copy the current frame into `target`, resizing it if needed.
    fn capture(&mut self, target: &mut RgbImage) -> VisionResult<()>;

    /// True once a finite source has no more frames.
    fn is_exhausted(&self) -> bool {
        false
    }

    /// Stop the stream. Called at most once per session.
    fn release(&mut self) {}
}

/// Face landmark model running on single frames.
pub trait LandmarkDetector: Send {
    /// Detect faces in `frame`, captured at `timestamp_ms`.
    fn detect(&mut self, frame: &RgbImage, timestamp_ms: u64) -> VisionResult<Vec<FaceLandmarks>>;

    /// Free model resources. Called at most once per session.
    fn close(&mut self) {}
}

/// Opens the camera.
#[async_trait]
pub trait CameraOpener: Send + Sync {
    async fn open(&self, request: CameraRequest) -> VisionResult<Box<dyn FrameSource>>;
}

/// Loads the landmark model.
#[async_trait]
pub trait DetectorLoader: Send + Sync {
    async fn load(&self, options: DetectorOptions) -> VisionResult<Box<dyn LandmarkDetector>>;
}

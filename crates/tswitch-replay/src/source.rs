//! Recording-backed camera and landmark detector.

use std::sync::Arc;

use async_trait::async_trait;
use image::RgbImage;
use tracing::debug;
use tswitch_models::FaceLandmarks;
use tswitch_vision::{
    CameraOpener, CameraRequest, DetectorLoader, DetectorOptions, FrameSource, LandmarkDetector,
    VisionError, VisionResult,
};

use crate::recording::Recording;

/// Plays recorded frames in order, one per capture.
#[derive(Debug)]
pub struct ReplaySource {
    recording: Arc<Recording>,
    cursor: usize,
    frame_size: (u32, u32),
}

impl ReplaySource {
    /// Open `recording`, reading the first frame's size from its image header.
    pub fn open(recording: Arc<Recording>) -> VisionResult<Self> {
        let Some(first) = recording.frame(0) else {
            return Err(VisionError::camera_unavailable("recording has no frames"));
        };
        let frame_size = image::image_dimensions(recording.frame_path(first))?;
        Ok(Self {
            recording,
            cursor: 0,
            frame_size,
        })
    }

    /// Index of the next frame to be captured.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl FrameSource for ReplaySource {
    fn frame_size(&self) -> Option<(u32, u32)> {
        if self.cursor >= self.recording.len() {
            return None;
        }
        Some(self.frame_size)
    }

    fn current_timestamp_ms(&self) -> Option<u64> {
        self.recording.frame(self.cursor).map(|f| f.timestamp_ms)
    }

    fn capture(&mut self, target: &mut RgbImage) -> VisionResult<()> {
        let Some(record) = self.recording.frame(self.cursor) else {
            return Err(VisionError::camera_unavailable(
                "recording has no more frames",
            ));
        };
        let path = self.recording.frame_path(record);
        // Advance first so an unreadable frame is skipped rather than retried
        self.cursor += 1;

        *target = image::open(&path)?.to_rgb8();
        self.frame_size = target.dimensions();
        debug!(frame = %path.display(), "Replayed frame");
        Ok(())
    }

    fn is_exhausted(&self) -> bool {
        self.cursor >= self.recording.len()
    }

    fn release(&mut self) {
        debug!(position = self.cursor, "Replay source released");
    }
}

/// Returns the faces recorded for each frame's timestamp.
#[derive(Debug)]
pub struct ReplayDetector {
    recording: Arc<Recording>,
    max_faces: usize,
}

impl LandmarkDetector for ReplayDetector {
    fn detect(&mut self, _frame: &RgbImage, timestamp_ms: u64) -> VisionResult<Vec<FaceLandmarks>> {
        Ok(self
            .recording
            .faces_at(timestamp_ms)
            .iter()
            .take(self.max_faces)
            .cloned()
            .collect())
    }
}

/// Opens a [`ReplaySource`] and loads a [`ReplayDetector`] over one recording.
#[derive(Debug, Clone)]
pub struct RecordingOpener {
    recording: Arc<Recording>,
}

impl RecordingOpener {
    pub fn new(recording: Arc<Recording>) -> Self {
        Self { recording }
    }
}

#[async_trait]
impl CameraOpener for RecordingOpener {
    async fn open(&self, request: CameraRequest) -> VisionResult<Box<dyn FrameSource>> {
        debug!(
            width = request.width,
            height = request.height,
            "Recorded frames are replayed at their native size"
        );
        Ok(Box::new(ReplaySource::open(Arc::clone(&self.recording))?))
    }
}

#[async_trait]
impl DetectorLoader for RecordingOpener {
    async fn load(&self, options: DetectorOptions) -> VisionResult<Box<dyn LandmarkDetector>> {
        Ok(Box::new(ReplayDetector {
            recording: Arc::clone(&self.recording),
            max_faces: options.max_faces,
        }))
    }
}

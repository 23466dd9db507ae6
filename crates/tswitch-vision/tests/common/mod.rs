//! Fake camera and landmark detector for session tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{Rgb, RgbImage};
use tswitch_models::{FaceLandmarks, NormalizedPoint};
use tswitch_vision::{
    CameraOpener, CameraRequest, DetectorLoader, DetectorOptions, FrameSource, LandmarkDetector,
    VisionError, VisionResult, INNER_LIP_LANDMARKS,
};

pub const TONGUE_RED: Rgb<u8> = Rgb([220, 30, 40]);
pub const WALL_WHITE: Rgb<u8> = Rgb([235, 235, 235]);

/// Face mesh whose inner lip is an ellipse around `(cx, cy)`.
///
/// Every other landmark, including the reference landmark 0, sits at the
/// center.
pub fn face(cx: f32, cy: f32, rx: f32, ry: f32) -> FaceLandmarks {
    let mut lm = FaceLandmarks::filled(468, NormalizedPoint::new(cx, cy));
    let n = INNER_LIP_LANDMARKS.len();
    for (i, &index) in INNER_LIP_LANDMARKS.iter().enumerate() {
        let angle = std::f32::consts::PI + i as f32 * std::f32::consts::TAU / n as f32;
        lm.set(
            index,
            NormalizedPoint::new(cx + rx * angle.cos(), cy + ry * angle.sin()),
        );
    }
    lm.set(13, NormalizedPoint::new(cx, cy - ry));
    lm.set(14, NormalizedPoint::new(cx, cy + ry));
    lm
}

/// Wide open mouth: 20px gap on a 200px frame.
pub fn open_face(cx: f32) -> FaceLandmarks {
    face(cx, 0.5, 0.1, 0.05)
}

/// Nearly closed mouth: 2px gap on a 200px frame.
pub fn closed_face(cx: f32) -> FaceLandmarks {
    face(cx, 0.5, 0.1, 0.005)
}

/// What the fake camera currently shows and the fake detector currently sees.
#[derive(Default)]
pub struct Stage {
    pub frame: Option<(u64, RgbImage)>,
    pub faces: Vec<FaceLandmarks>,
    pub fail_detection: bool,
    pub exhausted: bool,
}

/// Shared handle to a [`Stage`] plus teardown counters.
#[derive(Clone, Default)]
pub struct Rig {
    pub stage: Arc<Mutex<Stage>>,
    pub releases: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
    pub requested_faces: Arc<AtomicUsize>,
}

impl Rig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a new frame with the given faces.
    pub fn show(&self, timestamp_ms: u64, image: RgbImage, faces: Vec<FaceLandmarks>) {
        let mut stage = self.stage.lock().unwrap();
        stage.frame = Some((timestamp_ms, image));
        stage.faces = faces;
    }

    pub fn set_faces(&self, faces: Vec<FaceLandmarks>) {
        self.stage.lock().unwrap().faces = faces;
    }

    pub fn fail_detection(&self, fail: bool) {
        self.stage.lock().unwrap().fail_detection = fail;
    }

    pub fn exhaust(&self) {
        self.stage.lock().unwrap().exhausted = true;
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

pub struct FakeCamera {
    rig: Rig,
}

impl FrameSource for FakeCamera {
    fn frame_size(&self) -> Option<(u32, u32)> {
        let stage = self.rig.stage.lock().unwrap();
        stage.frame.as_ref().map(|(_, image)| image.dimensions())
    }

    fn current_timestamp_ms(&self) -> Option<u64> {
        let stage = self.rig.stage.lock().unwrap();
        stage.frame.as_ref().map(|(ts, _)| *ts)
    }

    fn capture(&mut self, target: &mut RgbImage) -> VisionResult<()> {
        let stage = self.rig.stage.lock().unwrap();
        match &stage.frame {
            Some((_, image)) => {
                target.clone_from(image);
                Ok(())
            }
            None => Err(VisionError::camera_unavailable("no frame")),
        }
    }

    fn is_exhausted(&self) -> bool {
        self.rig.stage.lock().unwrap().exhausted
    }

    fn release(&mut self) {
        self.rig.releases.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeDetector {
    rig: Rig,
    max_faces: usize,
}

impl LandmarkDetector for FakeDetector {
    fn detect(&mut self, _frame: &RgbImage, _timestamp_ms: u64) -> VisionResult<Vec<FaceLandmarks>> {
        let stage = self.rig.stage.lock().unwrap();
        if stage.fail_detection {
            return Err(VisionError::detection("model hiccup"));
        }
        Ok(stage.faces.iter().take(self.max_faces).cloned().collect())
    }

    fn close(&mut self) {
        self.rig.closes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CameraOpener for Rig {
    async fn open(&self, _request: CameraRequest) -> VisionResult<Box<dyn FrameSource>> {
        Ok(Box::new(FakeCamera { rig: self.clone() }))
    }
}

#[async_trait]
impl DetectorLoader for Rig {
    async fn load(&self, options: DetectorOptions) -> VisionResult<Box<dyn LandmarkDetector>> {
        self.requested_faces.store(options.max_faces, Ordering::SeqCst);
        Ok(Box::new(FakeDetector {
            rig: self.clone(),
            max_faces: options.max_faces,
        }))
    }
}

/// Camera that refuses to open.
pub struct DeniedCamera;

#[async_trait]
impl CameraOpener for DeniedCamera {
    async fn open(&self, _request: CameraRequest) -> VisionResult<Box<dyn FrameSource>> {
        Err(VisionError::camera_unavailable("permission denied"))
    }
}

/// Model that never loads.
pub struct BrokenModel;

#[async_trait]
impl DetectorLoader for BrokenModel {
    async fn load(&self, _options: DetectorOptions) -> VisionResult<Box<dyn LandmarkDetector>> {
        Err(VisionError::internal("model asset missing"))
    }
}

/// Uniform frame.
pub fn solid(color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(200, 200, color)
}

/// Left half `left`, right half `right`.
pub fn split(left: Rgb<u8>, right: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(200, 200, |x, _| if x < 100 { left } else { right })
}

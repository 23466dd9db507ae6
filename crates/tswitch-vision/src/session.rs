//! Detection session: lifecycle and frame loop.
//!
//! A session is created once with [`TongueSession::initialize`], which loads
//! the landmark model and opens the camera. After that every call to
//! [`TongueSession::tick`] processes at most one new frame synchronously and
//! republishes the gesture levels. The game reads levels through
//! [`TongueSession::consume_rising_edge`] on its own cadence.
//!
//! [`run_session`] drives `tick` from a tokio interval until shutdown.

use std::time::{Duration, Instant};

use image::RgbImage;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn, Instrument};
use tswitch_models::{Channel, FaceLandmarks, FaceReport, FrameReport, GestureSnapshot};

use crate::analyzer::FaceAnalyzer;
use crate::assignment::FaceAssigner;
use crate::config::{DropoutPolicy, GestureConfig};
use crate::edge::EdgeDetector;
use crate::error::{VisionError, VisionResult};
use crate::logging::SessionLogger;
use crate::mask::MaskScratch;
use crate::metrics;
use crate::overlay::{label_for, DebugOverlay, OverlayBuilder};
use crate::source::{CameraOpener, DetectorLoader, FrameSource, LandmarkDetector};

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The camera has no frame yet
    NotReady,
    /// The frame timestamp did not advance; nothing was done
    Duplicate,
    /// The session was torn down
    TornDown,
    /// A finite source ran out of frames
    Exhausted,
    /// A new frame was analyzed and levels were republished
    Processed(FrameReport),
}

impl TickOutcome {
    pub fn report(&self) -> Option<&FrameReport> {
        match self {
            TickOutcome::Processed(report) => Some(report),
            _ => None,
        }
    }

    /// True when no further tick can ever process a frame.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::TornDown | TickOutcome::Exhausted)
    }
}

/// Returned by the per-frame callback of [`run_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// A running tongue detection session.
pub struct TongueSession {
    config: GestureConfig,
    analyzer: FaceAnalyzer,
    assigner: FaceAssigner,
    edges: EdgeDetector,
    overlay: OverlayBuilder,
    logger: SessionLogger,

    source: Option<Box<dyn FrameSource>>,
    detector: Option<Box<dyn LandmarkDetector>>,

    /// Pooled capture buffer, overwritten by every frame
    frame: RgbImage,
    scratch: MaskScratch,

    last_timestamp: Option<u64>,
    levels: [bool; 2],
    publisher: watch::Sender<GestureSnapshot>,
    last_overlay: Option<DebugOverlay>,
    frames_processed: u64,
    torn_down: bool,
}

impl std::fmt::Debug for TongueSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TongueSession")
            .field("session_id", &self.logger.session_id())
            .field("mode", &self.logger.mode())
            .field("last_timestamp", &self.last_timestamp)
            .field("levels", &self.levels)
            .field("frames_processed", &self.frames_processed)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl TongueSession {
    /// Load the detector, open the camera and return a ready-to-tick session.
    ///
    /// Nothing is left open on failure: a camera failure closes the detector
    /// that was already loaded.
    pub async fn initialize(
        config: GestureConfig,
        loader: &dyn DetectorLoader,
        camera: &dyn CameraOpener,
    ) -> VisionResult<Self> {
        config.validate()?;
        let logger = SessionLogger::new(config.player_mode);

        let options = config.detector_options();
        let mut detector = loader.load(options).await.map_err(|e| {
            logger.log_error(&format!("landmark detector failed to load: {e}"));
            match e {
                VisionError::DetectorInit(_) => e,
                other => VisionError::detector_init(other.to_string()),
            }
        })?;

        let source = match camera.open(config.camera_request()).await {
            Ok(source) => source,
            Err(e) => {
                logger.log_error(&format!("camera failed to open: {e}"));
                detector.close();
                return Err(match e {
                    VisionError::CameraUnavailable(_) => e,
                    other => VisionError::camera_unavailable(other.to_string()),
                });
            }
        };

        logger.log_start(&format!(
            "max_faces={} min_open_px={} frac_threshold={}",
            options.max_faces, config.min_open_px, config.frac_threshold
        ));
        Ok(Self::assemble(config, logger, detector, source))
    }

    fn assemble(
        config: GestureConfig,
        logger: SessionLogger,
        detector: Box<dyn LandmarkDetector>,
        source: Box<dyn FrameSource>,
    ) -> Self {
        let (publisher, _) = watch::channel(GestureSnapshot::new(config.player_mode));
        Self {
            analyzer: FaceAnalyzer::new(&config),
            assigner: FaceAssigner::new(config.reference_landmark, config.lone_face_policy),
            edges: EdgeDetector::new(),
            overlay: OverlayBuilder::new(config.overlay_padding_px, config.mirror_overlay),
            logger,
            source: Some(source),
            detector: Some(detector),
            frame: RgbImage::new(0, 0),
            scratch: MaskScratch::new(),
            last_timestamp: None,
            levels: [false; 2],
            publisher,
            last_overlay: None,
            frames_processed: 0,
            torn_down: false,
            config,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn session_id(&self) -> &str {
        self.logger.session_id()
    }

    /// True once the camera delivers frames and until teardown.
    pub fn is_ready(&self) -> bool {
        !self.torn_down
            && self
                .source
                .as_ref()
                .is_some_and(|source| source.frame_size().is_some())
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Process the current frame if it is new.
    pub fn tick(&mut self) -> TickOutcome {
        if self.torn_down {
            return TickOutcome::TornDown;
        }
        let (Some(source), Some(detector)) = (self.source.as_mut(), self.detector.as_mut()) else {
            return TickOutcome::TornDown;
        };

        if source.is_exhausted() {
            return TickOutcome::Exhausted;
        }
        let timestamp_ms = match (source.frame_size(), source.current_timestamp_ms()) {
            (Some(_), Some(ts)) => ts,
            _ => {
                metrics::record_not_ready_frame();
                return TickOutcome::NotReady;
            }
        };
        if self.last_timestamp == Some(timestamp_ms) {
            metrics::record_duplicate_frame();
            return TickOutcome::Duplicate;
        }

        let started = Instant::now();
        if let Err(e) = source.capture(&mut self.frame) {
            warn!(
                session_id = %self.logger.session_id(),
                timestamp_ms,
                error = %e,
                "Frame capture failed"
            );
            return TickOutcome::NotReady;
        }
        self.last_timestamp = Some(timestamp_ms);

        let faces = match detector.detect(&self.frame, timestamp_ms) {
            Ok(faces) => faces,
            Err(e) => {
                warn!(
                    session_id = %self.logger.session_id(),
                    timestamp_ms,
                    error = %e,
                    "Landmark detection failed, treating frame as empty"
                );
                metrics::record_detection_error();
                Vec::new()
            }
        };

        let report = self.process_faces(timestamp_ms, &faces);
        self.frames_processed += 1;
        metrics::record_frame(faces.len(), started.elapsed().as_secs_f64() * 1000.0);
        debug!(
            timestamp_ms,
            faces = faces.len(),
            levels = ?self.levels,
            "Processed frame"
        );
        TickOutcome::Processed(report)
    }

    fn process_faces(&mut self, timestamp_ms: u64, faces: &[FaceLandmarks]) -> FrameReport {
        let mode = self.config.player_mode;
        let frame_width = self.frame.width();
        let assignment = self.assigner.assign(mode, faces);

        let mut reports = Vec::with_capacity(2);
        let mut boxes = Vec::with_capacity(2);
        let mut seen = [false; 2];

        for (channel, face) in assignment.iter() {
            let idx = channel.index();
            seen[idx] = true;
            match self.analyzer.analyze(&self.frame, face, &mut self.scratch) {
                Ok(analysis) => {
                    self.levels[idx] = analysis.tongue_out;
                    metrics::record_tongue_fraction(Some(channel), analysis.metrics.tongue_fraction);
                    boxes.push(self.overlay.lip_box(
                        Some(channel),
                        &analysis.bounds,
                        frame_width,
                        analysis.tongue_out,
                    ));
                    reports.push(FaceReport {
                        channel: Some(channel),
                        roi: analysis.roi,
                        metrics: analysis.metrics,
                        tongue_out: analysis.tongue_out,
                    });
                }
                Err(e) => {
                    self.logger
                        .log_warning(&format!("unusable landmark set for {channel}: {e}"));
                    metrics::record_invalid_face();
                    self.levels[idx] = false;
                }
            }
        }

        if self.config.dropout_policy == DropoutPolicy::Release {
            for &channel in mode.channels() {
                if !seen[channel.index()] {
                    self.levels[channel.index()] = false;
                }
            }
        }

        for &channel in mode.channels() {
            if self.edges.observe(channel, self.levels[channel.index()]) {
                metrics::record_rising_edge(channel);
                debug!(session_id = %self.logger.session_id(), %channel, timestamp_ms, "Rising edge");
            }
        }

        let snapshot = GestureSnapshot {
            mode,
            frame_timestamp_ms: Some(timestamp_ms),
            tongue_out: self.levels,
        };
        self.publisher.send_replace(snapshot);

        let p1_metrics = reports
            .iter()
            .find(|r| r.channel == Some(Channel::Player1))
            .map(|r| (r.metrics.tongue_fraction, r.metrics.open_px));
        self.last_overlay = Some(DebugOverlay {
            frame_width,
            frame_height: self.frame.height(),
            boxes,
            label: label_for(&snapshot, p1_metrics),
        });

        FrameReport {
            timestamp_ms,
            faces_detected: faces.len(),
            faces: reports,
            snapshot,
        }
    }

    /// Current level of `channel`.
    pub fn tongue_out(&self, channel: Channel) -> bool {
        self.levels[channel.index()]
    }

    /// True at most once per discrete gesture on `channel`.
    ///
    /// Edges are latched by `tick` on every processed frame, so a gesture
    /// that starts and ends between two calls is still reported once.
    /// Always false after teardown.
    pub fn consume_rising_edge(&mut self, channel: Channel) -> bool {
        if self.torn_down {
            return false;
        }
        self.edges.take_rising_edge(channel)
    }

    /// Latest published levels.
    pub fn snapshot(&self) -> GestureSnapshot {
        *self.publisher.borrow()
    }

    /// Observe published levels without touching the edge latches.
    pub fn subscribe(&self) -> watch::Receiver<GestureSnapshot> {
        self.publisher.subscribe()
    }

    /// Last captured frame. Empty until the first frame is processed.
    pub fn current_frame(&self) -> &RgbImage {
        &self.frame
    }

    /// Overlay of the last processed frame.
    pub fn last_overlay(&self) -> Option<&DebugOverlay> {
        self.last_overlay.as_ref()
    }

    /// Stop processing and release the camera and detector. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if let Some(mut source) = self.source.take() {
            source.release();
        }
        if let Some(mut detector) = self.detector.take() {
            detector.close();
        }
        self.logger
            .log_teardown(&format!("{} frames processed", self.frames_processed));
    }
}

impl Drop for TongueSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Tick `session` every `cadence` until shutdown, exhaustion or `on_frame`
/// asks to stop, then tear it down and hand it back.
///
/// `on_frame` runs after every tick, once the tick has fully completed; it is
/// where the consumer reads rising edges. Setting the shutdown flag stops the
/// loop; dropping its sender does not.
pub async fn run_session<F>(
    mut session: TongueSession,
    cadence: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
    mut on_frame: F,
) -> TongueSession
where
    F: FnMut(&mut TongueSession, &TickOutcome) -> LoopControl,
{
    let span = session.logger.create_span();
    async move {
        info!("Starting frame loop (cadence: {:?})", cadence);

        let mut ticker = interval(cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut shutdown_open = true;
        if !*shutdown_rx.borrow() {
            loop {
                tokio::select! {
                    changed = shutdown_rx.changed(), if shutdown_open => {
                        if changed.is_err() {
                            // Sender gone: no shutdown can arrive any more
                            shutdown_open = false;
                        } else if *shutdown_rx.borrow() {
                            info!("Shutdown signal received, stopping frame loop");
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        let outcome = session.tick();
                        let control = on_frame(&mut session, &outcome);
                        if outcome.is_terminal() || control == LoopControl::Stop {
                            break;
                        }
                    }
                }
            }
        }

        session.teardown();
        session
    }
    .instrument(span)
    .await
}

//! Tongue gesture detection.
//!
//! Turns a stream of video frames plus facial landmarks into per-player
//! "tongue out" levels and one-shot rising-edge events. The pipeline per face:
//!
//! 1. [`mouth_region`]: inner-lip polygon and clamped ROI
//! 2. [`estimator`]: mouth openness and tongue pixel fraction
//! 3. [`classifier`]: threshold both into a level
//! 4. [`edge`]: latch the level into rising edges
//!
//! [`session::TongueSession`] owns the frame loop and the upstream camera and
//! landmark detector seams defined in [`source`].

pub mod analyzer;
pub mod assignment;
pub mod classifier;
pub mod color;
pub mod config;
pub mod edge;
pub mod error;
pub mod estimator;
pub mod logging;
pub mod mask;
pub mod metrics;
pub mod mouth_region;
pub mod overlay;
pub mod session;
pub mod source;

pub use analyzer::{FaceAnalysis, FaceAnalyzer};
pub use assignment::{FaceAssigner, LoneFacePolicy};
pub use classifier::GestureThresholds;
pub use color::{is_tongue_colored, rgb_to_hsv, Hsv, TongueColorRule};
pub use config::{DropoutPolicy, GestureConfig};
pub use edge::{EdgeDetector, EdgeLatch};
pub use error::{VisionError, VisionResult};
pub use logging::SessionLogger;
pub use mask::MaskScratch;
pub use mouth_region::{MouthRegion, INNER_LIP_LANDMARKS, LOWER_INNER_LIP, UPPER_INNER_LIP};
pub use overlay::DebugOverlay;
pub use session::{run_session, LoopControl, TickOutcome, TongueSession};
pub use source::{CameraOpener, CameraRequest, DetectorLoader, DetectorOptions, FrameSource, LandmarkDetector};

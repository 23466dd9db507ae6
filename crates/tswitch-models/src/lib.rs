//! Shared data models for the tongue switch gesture pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Normalized facial landmarks as delivered by the external detector
//! - Pixel-space regions of interest
//! - Per-face frame metrics and per-frame reports
//! - Player channels and published gesture snapshots

pub mod channel;
pub mod landmarks;
pub mod rect;
pub mod report;

// Re-export common types
pub use channel::{Channel, ModelError, PlayerMode};
pub use landmarks::{FaceLandmarks, NormalizedPoint};
pub use rect::PixelRect;
pub use report::{FaceReport, FrameMetrics, FrameReport, GestureSnapshot};

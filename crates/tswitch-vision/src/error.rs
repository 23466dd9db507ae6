//! Error types for gesture detection.

use thiserror::Error;

/// Result type for gesture detection operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors that can occur while setting up or running a detection session.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Landmark detector initialization failed: {0}")]
    DetectorInit(String),

    #[error("Landmark detection failed: {0}")]
    Detection(String),

    #[error("Landmark set has {len} points, index {index} required")]
    InvalidLandmarks { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VisionError {
    /// Create a camera failure error.
    pub fn camera_unavailable(message: impl Into<String>) -> Self {
        Self::CameraUnavailable(message.into())
    }

    /// Create a detector initialization error.
    pub fn detector_init(message: impl Into<String>) -> Self {
        Self::DetectorInit(message.into())
    }

    /// Create a per-frame detection error.
    pub fn detection(message: impl Into<String>) -> Self {
        Self::Detection(message.into())
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if the error ends the session.
    ///
    /// Only startup failures are fatal; everything raised while processing a
    /// frame is absorbed by the frame loop.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            VisionError::CameraUnavailable(_)
                | VisionError::DetectorInit(_)
                | VisionError::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_errors_are_fatal() {
        assert!(VisionError::camera_unavailable("denied").is_fatal());
        assert!(VisionError::detector_init("model fetch").is_fatal());
        assert!(VisionError::invalid_config("empty lip list").is_fatal());
    }

    #[test]
    fn test_frame_errors_are_absorbed() {
        assert!(!VisionError::detection("timeout").is_fatal());
        assert!(!VisionError::InvalidLandmarks { index: 308, len: 68 }.is_fatal());
    }

    #[test]
    fn test_invalid_landmarks_message() {
        let err = VisionError::InvalidLandmarks { index: 14, len: 5 };
        assert_eq!(err.to_string(), "Landmark set has 5 points, index 14 required");
    }
}

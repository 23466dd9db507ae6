//! Replay error types.

use std::path::PathBuf;

use thiserror::Error;

pub type ReplayResult<T> = Result<T, ReplayError>;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Recording not found: {0}")]
    RecordingNotFound(PathBuf),

    #[error("Recording is empty: {0}")]
    EmptyRecording(PathBuf),

    #[error("Bad landmark record on line {line}: {source}")]
    BadRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Timestamps go backwards on line {line}: {timestamp_ms} after {previous_ms}")]
    NonMonotonic {
        line: usize,
        timestamp_ms: u64,
        previous_ms: u64,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Vision error: {0}")]
    Vision(#[from] tswitch_vision::VisionError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReplayError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

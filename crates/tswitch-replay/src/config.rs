//! Replay configuration.

use std::path::PathBuf;
use std::time::Duration;

use tswitch_vision::GestureConfig;

use crate::error::{ReplayError, ReplayResult};

/// Replay configuration.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Directory holding `landmarks.jsonl` and the frame images
    pub recording_dir: PathBuf,
    /// Where to write overlay frames, if anywhere
    pub overlay_dir: Option<PathBuf>,
    /// Tick cadence of the frame loop
    pub frame_interval: Duration,
    /// Optional JSON gesture config; env vars are used otherwise
    pub gesture_config_path: Option<PathBuf>,
    /// Install a Prometheus recorder and print it at the end
    pub metrics_enabled: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            recording_dir: PathBuf::from("./recording"),
            overlay_dir: None,
            frame_interval: Duration::from_millis(33), // ~30 fps
            gesture_config_path: None,
            metrics_enabled: false,
        }
    }
}

impl ReplayConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            recording_dir: std::env::var("REPLAY_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.recording_dir),
            overlay_dir: std::env::var("REPLAY_OVERLAY_DIR")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            frame_interval: Duration::from_millis(
                std::env::var("REPLAY_FRAME_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(33)
                    .max(1),
            ),
            gesture_config_path: std::env::var("TSWITCH_CONFIG")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            metrics_enabled: std::env::var("TSWITCH_METRICS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Gesture config from the JSON file when one is set, else from env.
    pub fn gesture_config(&self) -> ReplayResult<GestureConfig> {
        let config = match &self.gesture_config_path {
            Some(path) => GestureConfig::from_json_file(path)?,
            None => GestureConfig::from_env(),
        };
        config
            .validate()
            .map_err(|e| ReplayError::config_error(e.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReplayConfig::default();
        assert_eq!(config.frame_interval, Duration::from_millis(33));
        assert!(config.overlay_dir.is_none());
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn test_gesture_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gesture.json");
        std::fs::write(&path, r#"{"player_mode":"dual"}"#).unwrap();

        let config = ReplayConfig {
            gesture_config_path: Some(path),
            ..Default::default()
        };
        let gesture = config.gesture_config().unwrap();
        assert_eq!(gesture.player_mode.max_faces(), 2);
    }

    #[test]
    fn test_missing_gesture_config_file_fails() {
        let config = ReplayConfig {
            gesture_config_path: Some(PathBuf::from("/nonexistent/gesture.json")),
            ..Default::default()
        };
        assert!(config.gesture_config().is_err());
    }
}

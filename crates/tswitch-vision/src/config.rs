//! Configuration for the gesture pipeline.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tswitch_models::PlayerMode;

use crate::assignment::LoneFacePolicy;
use crate::classifier::GestureThresholds;
use crate::color::TongueColorRule;
use crate::error::{VisionError, VisionResult};
use crate::mouth_region::{INNER_LIP_LANDMARKS, LOWER_INNER_LIP, UPPER_INNER_LIP};
use crate::source::{CameraRequest, DetectorOptions};

/// What a channel's level does on a frame where its face was not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropoutPolicy {
    /// Keep the previous level; the channel is simply not advanced
    #[default]
    Hold,
    /// Force the level to false, re-arming the edge latch
    Release,
}

impl FromStr for DropoutPolicy {
    type Err = VisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hold" => Ok(Self::Hold),
            "release" | "reset" => Ok(Self::Release),
            other => Err(VisionError::invalid_config(format!(
                "unknown dropout policy '{other}'"
            ))),
        }
    }
}

/// Configuration for a detection session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    // === Players ===
    /// One or two players (default: single)
    pub player_mode: PlayerMode,

    /// Which channel a lone face drives in two-player mode (default: nearest)
    pub lone_face_policy: LoneFacePolicy,

    /// Level of a channel whose face is missing (default: hold)
    pub dropout_policy: DropoutPolicy,

    /// Landmark whose x-coordinate orders players left to right (default: 0)
    pub reference_landmark: usize,

    // === Thresholds ===
    /// Minimum inner-lip gap in pixels (default: 8)
    pub min_open_px: f32,

    /// Minimum tongue share of the visible mouth (default: 0.06)
    pub frac_threshold: f32,

    /// Pixel color rule for tongue detection
    pub color_rule: TongueColorRule,

    // === Landmarks ===
    /// Ordered inner-lip contour (default: 20 face mesh indices)
    pub inner_lip_landmarks: Vec<usize>,

    /// Upper inner-lip midpoint (default: 13)
    pub upper_lip_landmark: usize,

    /// Lower inner-lip midpoint (default: 14)
    pub lower_lip_landmark: usize,

    // === Camera ===
    /// Requested capture width (default: 640)
    pub camera_width: u32,

    /// Requested capture height (default: 480)
    pub camera_height: u32,

    // === Debug overlay ===
    /// Padding around the lip box in pixels (default: 5)
    pub overlay_padding_px: f32,

    /// Mirror boxes horizontally for a selfie view (default: true)
    pub mirror_overlay: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            player_mode: PlayerMode::Single,
            lone_face_policy: LoneFacePolicy::NearestLastKnown,
            dropout_policy: DropoutPolicy::Hold,
            reference_landmark: 0,

            min_open_px: 8.0,
            frac_threshold: 0.06,
            color_rule: TongueColorRule::default(),

            inner_lip_landmarks: INNER_LIP_LANDMARKS.to_vec(),
            upper_lip_landmark: UPPER_INNER_LIP,
            lower_lip_landmark: LOWER_INNER_LIP,

            camera_width: 640,
            camera_height: 480,

            overlay_padding_px: 5.0,
            mirror_overlay: true,
        }
    }
}

impl GestureConfig {
    /// One player, first face only.
    pub fn single_player() -> Self {
        Self::default()
    }

    /// Two players side by side.
    pub fn two_player() -> Self {
        Self {
            player_mode: PlayerMode::Dual,
            ..Default::default()
        }
    }

    /// Two players, reproducing the browser build: a lone face always drives
    /// player 1 and a missing face releases its channel.
    pub fn legacy_two_player() -> Self {
        Self {
            player_mode: PlayerMode::Dual,
            lone_face_policy: LoneFacePolicy::FirstChannel,
            dropout_policy: DropoutPolicy::Release,
            ..Default::default()
        }
    }

    /// Create config from environment variables, falling back to defaults.
    ///
    /// Unparseable values are ignored; call [`GestureConfig::validate`] on the
    /// result before use.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            player_mode: env_parse("TSWITCH_PLAYERS").unwrap_or(defaults.player_mode),
            lone_face_policy: env_parse("TSWITCH_LONE_FACE").unwrap_or(defaults.lone_face_policy),
            dropout_policy: env_parse("TSWITCH_DROPOUT").unwrap_or(defaults.dropout_policy),
            reference_landmark: env_parse("TSWITCH_REFERENCE_LANDMARK")
                .unwrap_or(defaults.reference_landmark),
            min_open_px: env_parse("TSWITCH_MIN_OPEN_PX").unwrap_or(defaults.min_open_px),
            frac_threshold: env_parse("TSWITCH_FRAC_THRESHOLD").unwrap_or(defaults.frac_threshold),
            camera_width: env_parse("TSWITCH_CAMERA_WIDTH").unwrap_or(defaults.camera_width),
            camera_height: env_parse("TSWITCH_CAMERA_HEIGHT").unwrap_or(defaults.camera_height),
            mirror_overlay: env_parse("TSWITCH_MIRROR_OVERLAY").unwrap_or(defaults.mirror_overlay),
            ..defaults
        }
    }

    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> VisionResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> VisionResult<()> {
        if self.inner_lip_landmarks.len() < 3 {
            return Err(VisionError::invalid_config(format!(
                "inner lip contour needs at least 3 landmarks, got {}",
                self.inner_lip_landmarks.len()
            )));
        }
        if !self.min_open_px.is_finite() || self.min_open_px < 0.0 {
            return Err(VisionError::invalid_config(format!(
                "min_open_px must be a non-negative number, got {}",
                self.min_open_px
            )));
        }
        if !(0.0..=1.0).contains(&self.frac_threshold) {
            return Err(VisionError::invalid_config(format!(
                "frac_threshold must be within [0, 1], got {}",
                self.frac_threshold
            )));
        }
        if self.camera_width == 0 || self.camera_height == 0 {
            return Err(VisionError::invalid_config("camera resolution must be non-zero"));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> GestureThresholds {
        GestureThresholds {
            min_open_px: self.min_open_px,
            frac_threshold: self.frac_threshold,
        }
    }

    pub fn detector_options(&self) -> DetectorOptions {
        DetectorOptions {
            max_faces: self.player_mode.max_faces(),
            video_mode: true,
        }
    }

    pub fn camera_request(&self) -> CameraRequest {
        CameraRequest {
            width: self.camera_width,
            height: self.camera_height,
        }
    }

    /// Highest landmark index any stage reads.
    pub fn max_landmark_index(&self) -> usize {
        self.inner_lip_landmarks
            .iter()
            .copied()
            .chain([
                self.upper_lip_landmark,
                self.lower_lip_landmark,
                self.reference_landmark,
            ])
            .max()
            .unwrap_or(0)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let config = GestureConfig::default();
        assert_eq!(config.min_open_px, 8.0);
        assert_eq!(config.frac_threshold, 0.06);
        assert_eq!(config.inner_lip_landmarks.len(), 20);
        assert_eq!(config.upper_lip_landmark, 13);
        assert_eq!(config.lower_lip_landmark, 14);
        assert_eq!(config.max_landmark_index(), 415);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(GestureConfig::two_player().detector_options().max_faces, 2);
        assert_eq!(GestureConfig::single_player().detector_options().max_faces, 1);

        let legacy = GestureConfig::legacy_two_player();
        assert_eq!(legacy.lone_face_policy, LoneFacePolicy::FirstChannel);
        assert_eq!(legacy.dropout_policy, DropoutPolicy::Release);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let short = GestureConfig {
            inner_lip_landmarks: vec![13, 14],
            ..Default::default()
        };
        assert!(short.validate().is_err());

        let frac = GestureConfig {
            frac_threshold: 1.5,
            ..Default::default()
        };
        assert!(frac.validate().is_err());

        let open = GestureConfig {
            min_open_px: -1.0,
            ..Default::default()
        };
        assert!(open.validate().unwrap_err().is_fatal());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: GestureConfig =
            serde_json::from_str(r#"{"player_mode":"dual","min_open_px":12.0}"#).unwrap();
        assert_eq!(config.player_mode, PlayerMode::Dual);
        assert_eq!(config.min_open_px, 12.0);
        assert_eq!(config.frac_threshold, 0.06);
        assert_eq!(config.inner_lip_landmarks, INNER_LIP_LANDMARKS.to_vec());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gesture.json");
        std::fs::write(&path, r#"{"dropout_policy":"release","frac_threshold":0.1}"#).unwrap();

        let config = GestureConfig::from_json_file(&path).unwrap();
        assert_eq!(config.dropout_policy, DropoutPolicy::Release);
        assert_eq!(config.frac_threshold, 0.1);

        std::fs::write(&path, r#"{"frac_threshold":2.0}"#).unwrap();
        assert!(GestureConfig::from_json_file(&path).is_err());
    }

    #[test]
    fn test_dropout_policy_parsing() {
        assert_eq!("Release".parse::<DropoutPolicy>().unwrap(), DropoutPolicy::Release);
        assert!("maybe".parse::<DropoutPolicy>().is_err());
    }
}

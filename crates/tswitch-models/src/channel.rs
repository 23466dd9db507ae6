//! Player channels and play modes.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when parsing model values from strings or indices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid channel index: {0}")]
    InvalidChannel(usize),

    #[error("Invalid player mode: {0}")]
    InvalidPlayerMode(String),
}

/// One player's independent gesture line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Left player in two-player mode, the only player otherwise
    Player1,
    /// Right player in two-player mode
    Player2,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Player1, Channel::Player2];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Player1 => 0,
            Channel::Player2 => 1,
        }
    }
}

impl TryFrom<usize> for Channel {
    type Error = ModelError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Channel::Player1),
            1 => Ok(Channel::Player2),
            other => Err(ModelError::InvalidChannel(other)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Player1 => write!(f, "P1"),
            Channel::Player2 => write!(f, "P2"),
        }
    }
}

/// How many players share the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayerMode {
    /// One player, first detected face only
    #[default]
    Single,
    /// Two players side by side, assigned left to right
    Dual,
}

impl PlayerMode {
    /// Number of faces the detector should be asked for.
    pub fn max_faces(self) -> usize {
        match self {
            PlayerMode::Single => 1,
            PlayerMode::Dual => 2,
        }
    }

    /// Channels that carry gesture state in this mode.
    pub fn channels(self) -> &'static [Channel] {
        const SINGLE: &[Channel] = &[Channel::Player1];
        const DUAL: &[Channel] = &[Channel::Player1, Channel::Player2];
        match self {
            PlayerMode::Single => SINGLE,
            PlayerMode::Dual => DUAL,
        }
    }
}

impl fmt::Display for PlayerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerMode::Single => write!(f, "single"),
            PlayerMode::Dual => write!(f, "dual"),
        }
    }
}

impl FromStr for PlayerMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "single" | "one" => Ok(PlayerMode::Single),
            "2" | "dual" | "two" => Ok(PlayerMode::Dual),
            other => Err(ModelError::InvalidPlayerMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_index_roundtrip() {
        for ch in Channel::ALL {
            assert_eq!(Channel::try_from(ch.index()).unwrap(), ch);
        }
        assert_eq!(Channel::try_from(2), Err(ModelError::InvalidChannel(2)));
    }

    #[test]
    fn test_player_mode_parsing() {
        assert_eq!("2".parse::<PlayerMode>().unwrap(), PlayerMode::Dual);
        assert_eq!(" Single ".parse::<PlayerMode>().unwrap(), PlayerMode::Single);
        assert!("three".parse::<PlayerMode>().is_err());
    }

    #[test]
    fn test_player_mode_channels() {
        assert_eq!(PlayerMode::Single.channels(), &[Channel::Player1]);
        assert_eq!(PlayerMode::Dual.channels().len(), 2);
        assert_eq!(PlayerMode::Dual.max_faces(), 2);
    }

    #[test]
    fn test_channel_serializes_snake_case() {
        let json = serde_json::to_string(&Channel::Player2).unwrap();
        assert_eq!(json, "\"player2\"");
    }
}

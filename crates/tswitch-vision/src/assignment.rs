//! Left/right player assignment for two-player sessions.
//!
//! Faces are ordered by the x-coordinate of a reference landmark: the
//! leftmost face drives [`Channel::Player1`], the next one
//! [`Channel::Player2`]. Detector output order never matters.
//!
//! A lone face is ambiguous. [`LoneFacePolicy`] decides which channel it
//! drives; the other channel is left untouched for that frame.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use tswitch_models::{Channel, FaceLandmarks, PlayerMode};

use crate::error::VisionError;

/// Where a lone face goes when two players are expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoneFacePolicy {
    /// Channel whose last known position is closest to the face.
    /// Channels never seen fall back to their half of the frame.
    #[default]
    NearestLastKnown,
    /// Always player 1, whatever the position
    FirstChannel,
    /// Update neither channel
    Ignore,
}

impl FromStr for LoneFacePolicy {
    type Err = VisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "nearest_last_known" => Ok(Self::NearestLastKnown),
            "first" | "first_channel" => Ok(Self::FirstChannel),
            "ignore" | "none" => Ok(Self::Ignore),
            other => Err(VisionError::invalid_config(format!(
                "unknown lone face policy '{other}'"
            ))),
        }
    }
}

/// Assumed positions for channels that have not been seen yet.
const SIDE_PRIOR_X: [f32; 2] = [0.25, 0.75];

/// Faces mapped to channels for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assignment<'a> {
    slots: [Option<&'a FaceLandmarks>; 2],
    /// Detected faces that drive no channel
    pub unassigned: usize,
}

impl<'a> Assignment<'a> {
    #[inline]
    pub fn face(&self, channel: Channel) -> Option<&'a FaceLandmarks> {
        self.slots[channel.index()]
    }

    /// Assigned faces in channel order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &'a FaceLandmarks)> + '_ {
        Channel::ALL
            .into_iter()
            .filter_map(|ch| self.slots[ch.index()].map(|face| (ch, face)))
    }
}

/// Per-frame face to channel mapper.
///
/// Only the last known reference position per channel is remembered, and only
/// to resolve lone faces.
#[derive(Debug, Clone)]
pub struct FaceAssigner {
    reference_landmark: usize,
    policy: LoneFacePolicy,
    last_known_x: [Option<f32>; 2],
}

impl FaceAssigner {
    pub fn new(reference_landmark: usize, policy: LoneFacePolicy) -> Self {
        Self {
            reference_landmark,
            policy,
            last_known_x: [None; 2],
        }
    }

    pub fn last_known_x(&self, channel: Channel) -> Option<f32> {
        self.last_known_x[channel.index()]
    }

    /// Map this frame's faces to channels.
    pub fn assign<'a>(&mut self, mode: PlayerMode, faces: &'a [FaceLandmarks]) -> Assignment<'a> {
        let assignment = match mode {
            PlayerMode::Single => Assignment {
                slots: [faces.first(), None],
                unassigned: faces.len().saturating_sub(1),
            },
            PlayerMode::Dual => self.assign_dual(faces),
        };

        for (channel, face) in assignment.iter() {
            if let Some(x) = face.reference_x(self.reference_landmark) {
                self.last_known_x[channel.index()] = Some(x);
            }
        }
        assignment
    }

    fn assign_dual<'a>(&self, faces: &'a [FaceLandmarks]) -> Assignment<'a> {
        let mut ordered: Vec<&FaceLandmarks> = faces.iter().collect();
        ordered.sort_by(|a, b| self.sort_key(a).total_cmp(&self.sort_key(b)));

        match ordered.as_slice() {
            [] => Assignment::default(),
            [lone] => {
                let channel = self.lone_face_channel(lone);
                debug!(policy = ?self.policy, ?channel, "Lone face in two-player mode");
                match channel {
                    Some(Channel::Player1) => Assignment {
                        slots: [Some(*lone), None],
                        unassigned: 0,
                    },
                    Some(Channel::Player2) => Assignment {
                        slots: [None, Some(*lone)],
                        unassigned: 0,
                    },
                    None => Assignment {
                        slots: [None, None],
                        unassigned: 1,
                    },
                }
            }
            [left, right, rest @ ..] => Assignment {
                slots: [Some(*left), Some(*right)],
                unassigned: rest.len(),
            },
        }
    }

    fn sort_key(&self, face: &FaceLandmarks) -> f32 {
        face.reference_x(self.reference_landmark)
            .unwrap_or(f32::INFINITY)
    }

    fn lone_face_channel(&self, face: &FaceLandmarks) -> Option<Channel> {
        match self.policy {
            LoneFacePolicy::Ignore => None,
            LoneFacePolicy::FirstChannel => Some(Channel::Player1),
            LoneFacePolicy::NearestLastKnown => {
                let Some(x) = face.reference_x(self.reference_landmark) else {
                    return Some(Channel::Player1);
                };
                let distance = |ch: Channel| {
                    let anchor = self.last_known_x[ch.index()].unwrap_or(SIDE_PRIOR_X[ch.index()]);
                    (x - anchor).abs()
                };
                if distance(Channel::Player2) < distance(Channel::Player1) {
                    Some(Channel::Player2)
                } else {
                    Some(Channel::Player1)
                }
            }
        }
    }
}

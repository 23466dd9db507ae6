//! Recorded session format.
//!
//! A recording is a directory with one image per frame and a
//! `landmarks.jsonl` file. Each line describes one frame:
//!
//! ```json
//! {"timestamp_ms": 33, "frame": "frame_0001.png", "faces": [[{"x": 0.41, "y": 0.62}, ...]]}
//! ```
//!
//! `faces` holds the detector output for that frame, one 468-point list per
//! face, in detector order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tswitch_models::FaceLandmarks;

use crate::error::{ReplayError, ReplayResult};

/// Name of the landmark dump inside a recording directory.
pub const LANDMARKS_FILE: &str = "landmarks.jsonl";

/// One line of the landmark dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub timestamp_ms: u64,
    /// Image path, relative to the recording directory
    pub frame: PathBuf,
    #[serde(default)]
    pub faces: Vec<FaceLandmarks>,
}

/// A loaded recording, frames in timestamp order.
#[derive(Debug, Clone)]
pub struct Recording {
    root: PathBuf,
    frames: Vec<FrameRecord>,
    faces_by_timestamp: HashMap<u64, Vec<FaceLandmarks>>,
}

impl Recording {
    /// Load the landmark dump of the recording in `root`.
    ///
    /// Repeated timestamps are the same camera frame and are kept once.
    pub fn load(root: &Path) -> ReplayResult<Self> {
        let landmarks_path = root.join(LANDMARKS_FILE);
        if !landmarks_path.is_file() {
            return Err(ReplayError::RecordingNotFound(landmarks_path));
        }
        let raw = std::fs::read_to_string(&landmarks_path)?;
        let recording = Self::parse(root, &raw)?;
        info!(
            "Loaded recording {} ({} frames)",
            root.display(),
            recording.len()
        );
        Ok(recording)
    }

    /// Parse a landmark dump whose frames live under `root`.
    pub fn parse(root: &Path, raw: &str) -> ReplayResult<Self> {
        let mut frames: Vec<FrameRecord> = Vec::new();
        for (i, line) in raw.lines().enumerate() {
            let line_no = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            let record: FrameRecord = serde_json::from_str(line)
                .map_err(|source| ReplayError::BadRecord {
                    line: line_no,
                    source,
                })?;

            if let Some(previous) = frames.last() {
                if record.timestamp_ms < previous.timestamp_ms {
                    return Err(ReplayError::NonMonotonic {
                        line: line_no,
                        timestamp_ms: record.timestamp_ms,
                        previous_ms: previous.timestamp_ms,
                    });
                }
                if record.timestamp_ms == previous.timestamp_ms {
                    debug!(line = line_no, timestamp_ms = record.timestamp_ms, "Skipping repeated frame");
                    continue;
                }
            }
            frames.push(record);
        }

        if frames.is_empty() {
            return Err(ReplayError::EmptyRecording(root.to_path_buf()));
        }

        let faces_by_timestamp = frames
            .iter()
            .map(|f| (f.timestamp_ms, f.faces.clone()))
            .collect();
        Ok(Self {
            root: root.to_path_buf(),
            frames,
            faces_by_timestamp,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&FrameRecord> {
        self.frames.get(index)
    }

    /// Absolute path of the image for `record`.
    pub fn frame_path(&self, record: &FrameRecord) -> PathBuf {
        self.root.join(&record.frame)
    }

    /// Faces recorded for the frame at `timestamp_ms`; none if unknown.
    pub fn faces_at(&self, timestamp_ms: u64) -> &[FaceLandmarks] {
        self.faces_by_timestamp
            .get(&timestamp_ms)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

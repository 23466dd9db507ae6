//! Writes debug overlay frames to disk.

use std::path::{Path, PathBuf};

use image::imageops;
use tswitch_vision::TongueSession;

use crate::error::ReplayResult;

/// Saves a mirrored copy of each processed frame with its overlay drawn on.
#[derive(Debug, Clone)]
pub struct OverlayWriter {
    dir: PathBuf,
    mirror: bool,
}

impl OverlayWriter {
    /// Create the output directory if needed.
    pub fn new(dir: &Path, mirror: bool) -> ReplayResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            mirror,
        })
    }

    /// Render the session's latest overlay. Returns the written path, or
    /// `None` when nothing has been processed yet.
    pub fn write(&self, session: &TongueSession, timestamp_ms: u64) -> ReplayResult<Option<PathBuf>> {
        let Some(overlay) = session.last_overlay() else {
            return Ok(None);
        };
        let frame = session.current_frame();
        let mut canvas = if self.mirror {
            imageops::flip_horizontal(frame)
        } else {
            frame.clone()
        };
        overlay.render(&mut canvas);

        let path = self.dir.join(format!("overlay_{timestamp_ms:08}.png"));
        canvas.save(&path)?;
        Ok(Some(path))
    }
}

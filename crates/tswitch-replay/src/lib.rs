//! Offline host for the tongue switch pipeline.
//!
//! Replays a recorded camera session (frame images plus the landmark detector
//! output captured alongside them) through a [`tswitch_vision::TongueSession`],
//! counts jumps the way a game would and optionally writes overlay frames.

pub mod config;
pub mod consumer;
pub mod error;
pub mod overlay_writer;
pub mod recording;
pub mod source;

pub use config::ReplayConfig;
pub use consumer::{JumpCounter, JumpEvent, ReplaySummary};
pub use error::{ReplayError, ReplayResult};
pub use overlay_writer::OverlayWriter;
pub use recording::{FrameRecord, Recording, LANDMARKS_FILE};
pub use source::{RecordingOpener, ReplayDetector, ReplaySource};

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;
use tswitch_vision::{run_session, GestureConfig, LoopControl, TongueSession};

/// Replay `recording` to the end (or until shutdown) and summarize it.
pub async fn replay(
    recording: Arc<Recording>,
    gesture: GestureConfig,
    config: &ReplayConfig,
    shutdown_rx: watch::Receiver<bool>,
) -> ReplayResult<ReplaySummary> {
    let opener = RecordingOpener::new(recording);
    let writer = config
        .overlay_dir
        .as_deref()
        .map(|dir| OverlayWriter::new(dir, gesture.mirror_overlay))
        .transpose()?;

    let mut counter = JumpCounter::new(gesture.player_mode);
    let session = TongueSession::initialize(gesture, &opener, &opener).await?;

    let session = run_session(
        session,
        config.frame_interval,
        shutdown_rx,
        |session, outcome| {
            counter.observe(session);
            if let (Some(writer), Some(report)) = (writer.as_ref(), outcome.report()) {
                if let Err(e) = writer.write(session, report.timestamp_ms) {
                    warn!("Failed to write overlay frame {}: {}", report.timestamp_ms, e);
                }
            }
            LoopControl::Continue
        },
    )
    .await;

    Ok(counter.summary(&session))
}

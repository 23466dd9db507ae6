//! Game-side consumer: turns rising edges into jumps.

use serde::Serialize;
use tracing::info;
use tswitch_models::{Channel, PlayerMode};
use tswitch_vision::TongueSession;

/// One jump triggered by a rising edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JumpEvent {
    pub channel: Channel,
    /// Timestamp of the frame the edge was read after
    pub timestamp_ms: Option<u64>,
}

/// Result of a replay, printed as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub session_id: String,
    pub mode: PlayerMode,
    pub frames_processed: u64,
    pub jumps: [u64; 2],
    pub events: Vec<JumpEvent>,
}

/// Reads edges once per tick, the way a game reads them once per game frame.
#[derive(Debug, Clone)]
pub struct JumpCounter {
    mode: PlayerMode,
    jumps: [u64; 2],
    events: Vec<JumpEvent>,
}

impl JumpCounter {
    pub fn new(mode: PlayerMode) -> Self {
        Self {
            mode,
            jumps: [0; 2],
            events: Vec::new(),
        }
    }

    /// Consume this tick's edges for every active channel.
    pub fn observe(&mut self, session: &mut TongueSession) -> usize {
        let timestamp_ms = session.snapshot().frame_timestamp_ms;
        let mut fired = 0;
        for &channel in self.mode.channels() {
            if session.consume_rising_edge(channel) {
                self.jumps[channel.index()] += 1;
                self.events.push(JumpEvent {
                    channel,
                    timestamp_ms,
                });
                info!(%channel, ?timestamp_ms, "Jump");
                fired += 1;
            }
        }
        fired
    }

    pub fn jumps(&self, channel: Channel) -> u64 {
        self.jumps[channel.index()]
    }

    pub fn summary(&self, session: &TongueSession) -> ReplaySummary {
        ReplaySummary {
            session_id: session.session_id().to_string(),
            mode: self.mode,
            frames_processed: session.frames_processed(),
            jumps: self.jumps,
            events: self.events.clone(),
        }
    }
}

//! Rising-edge extraction per channel.
//!
//! A held tongue produces a `true` level on every frame; games want one jump
//! per gesture. Each channel keeps a one-bit latch that is fed every processed
//! frame's level, fires on the first `true` level and re-arms as soon as the
//! level drops. A fired edge stays pending until the consumer takes it, so the
//! consumer may read less often than frames arrive.

use tswitch_models::Channel;

/// One-bit latch for a single channel.
///
/// `last_state` is only ever true while the most recently observed level was
/// true as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeLatch {
    last_state: bool,
}

impl EdgeLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current level; returns `true` exactly on a rising edge.
    #[inline]
    pub fn observe(&mut self, level: bool) -> bool {
        if !level {
            self.last_state = false;
            return false;
        }
        if self.last_state {
            return false;
        }
        self.last_state = true;
        true
    }
}

/// Latches and pending edges for both channels.
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    latches: [EdgeLatch; 2],
    pending: [bool; 2],
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the level `channel` settled on for a processed frame.
    ///
    /// Returns `true` when this frame is a rising edge; the edge is then
    /// pending until [`EdgeDetector::take_rising_edge`].
    pub fn observe(&mut self, channel: Channel, level: bool) -> bool {
        let idx = channel.index();
        let fired = self.latches[idx].observe(level);
        if fired {
            self.pending[idx] = true;
        }
        fired
    }

    /// Take the pending edge of `channel`, if any. Leaves the latch alone.
    pub fn take_rising_edge(&mut self, channel: Channel) -> bool {
        std::mem::take(&mut self.pending[channel.index()])
    }
}

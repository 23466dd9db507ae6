//! Structured session logging.
//!
//! Every detection session gets an id so log lines from concurrent sessions
//! (two browser tabs, a replay next to a live camera) can be told apart.

use tracing::{error, info, warn, Span};
use tswitch_models::PlayerMode;
use uuid::Uuid;

/// Session logger with consistent contextual fields.
#[derive(Debug, Clone)]
pub struct SessionLogger {
    session_id: String,
    mode: PlayerMode,
}

impl SessionLogger {
    /// Create a logger with a fresh session id.
    pub fn new(mode: PlayerMode) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            mode,
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            mode = %self.mode,
            "Session started: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            session_id = %self.session_id,
            mode = %self.mode,
            "Session warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            session_id = %self.session_id,
            mode = %self.mode,
            "Session error: {}", message
        );
    }

    pub fn log_teardown(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            mode = %self.mode,
            "Session torn down: {}", message
        );
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn mode(&self) -> PlayerMode {
        self.mode
    }

    /// Span carrying the session context, for entering around frame work.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "tongue_session",
            session_id = %self.session_id,
            mode = %self.mode
        )
    }
}

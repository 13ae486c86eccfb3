//! HTTP API handlers — exposes the coordinator to game clients.

pub mod play;
pub mod sessions;

use std::time::Duration;

use axum::http::StatusCode;

use bigtac_services::{Coordinator, CoordinatorError};

#[derive(Clone)]
pub struct ApiState {
    pub coordinator: Coordinator,
    /// Wait bound applied when a request does not carry its own.
    pub default_timeout: Option<Duration>,
}

impl ApiState {
    pub fn new(coordinator: Coordinator, default_timeout: Option<Duration>) -> Self {
        Self {
            coordinator,
            default_timeout,
        }
    }

    /// A request's `timeout_ms`, falling back to the configured default.
    /// `timeout_ms: 0` asks for an unbounded wait.
    fn timeout_for(&self, timeout_ms: Option<u64>) -> Option<Duration> {
        match timeout_ms {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => self.default_timeout,
        }
    }
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Map a coordinator error to the status code clients see.
fn error_response(e: CoordinatorError) -> (StatusCode, String) {
    let status = match e {
        CoordinatorError::NotFound(_) => StatusCode::NOT_FOUND,
        CoordinatorError::AlreadyJoined(_) => StatusCode::CONFLICT,
        CoordinatorError::Finished(_) => StatusCode::GONE,
        CoordinatorError::TimedOut { .. } => StatusCode::REQUEST_TIMEOUT,
        CoordinatorError::ShuttingDown => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, e.to_string())
}

pub use play::{handle_banner, handle_create, handle_join, handle_move, handle_wait};
pub use sessions::{handle_session_inspect, handle_status};

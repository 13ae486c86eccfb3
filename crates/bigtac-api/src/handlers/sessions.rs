//! /status and /sessions handlers — session inspection.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use bigtac_core::SessionId;
use bigtac_services::SessionSummary;

use super::{error_response, ApiState};

// ── /status (GET) ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatusResponse {
    pub session_count: usize,
    pub shutting_down: bool,
    pub sessions: Vec<SessionSummary>,
}

pub async fn handle_status(State(state): State<ApiState>) -> Json<StatusResponse> {
    let sessions = state.coordinator.sessions();
    Json(StatusResponse {
        session_count: sessions.len(),
        shutting_down: state.coordinator.is_shutting_down(),
        sessions,
    })
}

// ── /sessions/{id} (GET) ──────────────────────────────────────────────────────

pub async fn handle_session_inspect(
    State(state): State<ApiState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionSummary>, (StatusCode, String)> {
    let session = state.coordinator.get(id).map_err(error_response)?;
    Ok(Json(session.summary()))
}

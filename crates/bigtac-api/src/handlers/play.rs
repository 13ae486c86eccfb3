//! Game-flow handlers: create, join, wait, move.
//!
//! `/wait` and `/move` hold the request open until the other player acts
//! (or the wait bound expires). A client that disconnects drops the handler
//! future, which cancels its wait on the session.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use bigtac_core::wire::{
    CreateRequest, CreateResponse, JoinRequest, JoinResponse, MoveRequest, MoveResponse,
    WaitRequest, WaitResponse,
};
use bigtac_services::RelayOutcome;

use super::{error_response, ApiState};

// ── / (GET) ───────────────────────────────────────────────────────────────────

pub async fn handle_banner() -> &'static str {
    "Big Tac Toe"
}

// ── /create (POST) ────────────────────────────────────────────────────────────

pub async fn handle_create(
    State(state): State<ApiState>,
    Json(req): Json<CreateRequest>,
) -> Json<CreateResponse> {
    let game_id = state.coordinator.create(req.player);
    Json(CreateResponse { game_id })
}

// ── /join (POST) ──────────────────────────────────────────────────────────────

pub async fn handle_join(
    State(state): State<ApiState>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<JoinResponse>, (StatusCode, String)> {
    let opponent = state
        .coordinator
        .join(req.game_id, req.player)
        .map_err(error_response)?;

    Ok(Json(JoinResponse {
        game_id: req.game_id,
        opponent,
    }))
}

// ── /wait (POST) ──────────────────────────────────────────────────────────────

pub async fn handle_wait(
    State(state): State<ApiState>,
    Json(req): Json<WaitRequest>,
) -> Result<Json<WaitResponse>, (StatusCode, String)> {
    let timeout = state.timeout_for(req.timeout_ms);
    let opponent = state
        .coordinator
        .await_join(req.game_id, timeout)
        .await
        .map_err(error_response)?;

    Ok(Json(WaitResponse {
        game_id: req.game_id,
        opponent,
    }))
}

// ── /move (POST) ──────────────────────────────────────────────────────────────

pub async fn handle_move(
    State(state): State<ApiState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, (StatusCode, String)> {
    let timeout = state.timeout_for(req.timeout_ms);
    let outcome = state
        .coordinator
        .relay(req.game_id, req.player, req.move_data, req.game_over, timeout)
        .await
        .map_err(error_response)?;

    let response = match outcome {
        RelayOutcome::Reply { payload, game_over } => MoveResponse {
            game_id: req.game_id,
            reply: Some(payload),
            game_over,
        },
        RelayOutcome::GameOver => MoveResponse {
            game_id: req.game_id,
            reply: None,
            game_over: true,
        },
    };
    Ok(Json(response))
}

//! Request/response bodies exchanged between clients and the relay.
//!
//! Field names match the JSON the game clients already send:
//!   {"game_id": 3, "player": 0, "move": "e2e4", "game_over": false}
//!
//! Move payloads are opaque strings. Nothing here knows about the rules
//! of the game being played.

use serde::{Deserialize, Serialize};

/// Session identifier handed out by the relay. Starts at 1.
pub type SessionId = u64;

/// Which side of a session a participant is playing.
///
/// The creator of a session is `First` (wire value 0), the joiner is
/// `Second` (wire value 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    /// The other side of the board.
    pub fn opponent(self) -> Slot {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }

    /// Index into per-slot arrays.
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }
}

impl TryFrom<u8> for Slot {
    type Error = WireError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Slot::First),
            1 => Ok(Slot::Second),
            other => Err(WireError::InvalidSlot(other)),
        }
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> u8 {
        slot.index() as u8
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

// ── Requests ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    pub player: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub game_id: SessionId,
    pub player: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitRequest {
    pub game_id: SessionId,
    /// Overrides the relay's configured wait. Absent = use the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub game_id: SessionId,
    pub player: Slot,
    #[serde(rename = "move")]
    pub move_data: String,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

// ── Responses ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    pub game_id: SessionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinResponse {
    pub game_id: SessionId,
    /// Name of the participant who created the session.
    pub opponent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitResponse {
    pub game_id: SessionId,
    /// Name of the participant who joined.
    pub opponent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub game_id: SessionId,
    /// The opponent's next move. `None` when this move ended the game.
    pub reply: Option<String>,
    /// Set when either this move or the opponent's reply ended the game.
    pub game_over: bool,
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("player slot must be 0 or 1, got {0}")]
    InvalidSlot(u8),
}

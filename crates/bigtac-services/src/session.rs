//! One match between two participants.
//!
//! A session carries the two display names and three mailboxes:
//! one inbound mailbox per slot for moves, and a one-shot join mailbox that
//! carries the second player's name to whoever is waiting for them.
//!
//! Inbound mailboxes are indexed by the *receiving* slot. A move sent by
//! slot 0 lands in `inbound[1]` and vice versa.

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use serde::Serialize;

use bigtac_core::{SessionId, Slot};

use crate::error::CoordinatorError;
use crate::mailbox::Mailbox;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Created, second player has not joined.
    Waiting,
    /// Both players present, moves are being relayed.
    Active,
    /// A move was flagged as the last one. No further relays.
    Finished,
}

/// A relayed move as it sits in the receiver's mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub payload: String,
    /// Set when the sender ended the game with this move.
    pub game_over: bool,
}

impl Move {
    pub fn new(payload: impl Into<String>, game_over: bool) -> Self {
        Self {
            payload: payload.into(),
            game_over,
        }
    }
}

pub struct Session {
    id: SessionId,
    first: String,
    second: OnceLock<String>,
    inbound: [Mailbox<Move>; 2],
    joined: Mailbox,
    finished: AtomicBool,
    created_at: Instant,
    // Millis since `created_at` of the last call that touched this session.
    last_activity_ms: AtomicU64,
    moves: AtomicU64,
    waiters: AtomicUsize,
}

/// Read-only view of a session for status endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub game_id: SessionId,
    pub first: String,
    pub second: Option<String>,
    pub state: SessionState,
    pub moves: u64,
    pub waiters: usize,
    pub age_secs: u64,
    pub idle_secs: u64,
}

impl Session {
    pub fn new(id: SessionId, first: String) -> Self {
        Self {
            id,
            first,
            second: OnceLock::new(),
            inbound: [Mailbox::new(), Mailbox::new()],
            joined: Mailbox::new(),
            finished: AtomicBool::new(false),
            created_at: Instant::now(),
            last_activity_ms: AtomicU64::new(0),
            moves: AtomicU64::new(0),
            waiters: AtomicUsize::new(0),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Name of the player who created the session.
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Name of the player who joined, once they have.
    pub fn second(&self) -> Option<&str> {
        self.second.get().map(String::as_str)
    }

    pub fn state(&self) -> SessionState {
        if self.finished.load(Ordering::Acquire) {
            SessionState::Finished
        } else if self.second.get().is_some() {
            SessionState::Active
        } else {
            SessionState::Waiting
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Record the second player and signal whoever is waiting for them.
    ///
    /// Returns the first player's name. Only the first call succeeds; later
    /// calls get `AlreadyJoined` and leave the recorded name untouched.
    pub fn join(&self, name: String) -> Result<&str, CoordinatorError> {
        if self.is_finished() {
            return Err(CoordinatorError::Finished(self.id));
        }
        self.second
            .set(name.clone())
            .map_err(|_| CoordinatorError::AlreadyJoined(self.id))?;
        // The slot can only be filled once, by the single successful `set`.
        self.joined
            .try_send(name)
            .map_err(|_| CoordinatorError::AlreadyJoined(self.id))?;
        self.touch();
        Ok(self.first.as_str())
    }

    /// Wait for the join signal. Yields a value at most once per session.
    pub async fn joined(&self) -> String {
        self.joined.recv().await
    }

    /// Mailbox that `slot` reads the opponent's moves from.
    pub fn inbound(&self, slot: Slot) -> &Mailbox<Move> {
        &self.inbound[slot.index()]
    }

    /// Flip the session to finished. Only the first caller gets `true`.
    pub fn finish(&self) -> bool {
        !self.finished.swap(true, Ordering::AcqRel)
    }

    pub fn record_move(&self) {
        self.moves.fetch_add(1, Ordering::Relaxed);
        self.touch();
    }

    pub fn moves(&self) -> u64 {
        self.moves.load(Ordering::Relaxed)
    }

    pub fn touch(&self) {
        let ms = self.created_at.elapsed().as_millis() as u64;
        self.last_activity_ms.fetch_max(ms, Ordering::Relaxed);
    }

    /// Time since the last join, move or reply, measured at `now`.
    pub fn idle_for(&self, now: Instant) -> Duration {
        let last = self.created_at
            + Duration::from_millis(self.last_activity_ms.load(Ordering::Relaxed));
        now.saturating_duration_since(last)
    }

    /// Number of calls currently suspended on this session.
    pub fn waiters(&self) -> usize {
        self.waiters.load(Ordering::Relaxed)
    }

    /// Count a suspended call for as long as the guard lives.
    pub fn waiter(self: &Arc<Self>) -> WaiterGuard {
        self.waiters.fetch_add(1, Ordering::Relaxed);
        WaiterGuard {
            session: Arc::clone(self),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        let now = Instant::now();
        SessionSummary {
            game_id: self.id,
            first: self.first.clone(),
            second: self.second().map(str::to_string),
            state: self.state(),
            moves: self.moves(),
            waiters: self.waiters(),
            age_secs: now.saturating_duration_since(self.created_at).as_secs(),
            idle_secs: self.idle_for(now).as_secs(),
        }
    }
}

/// A session handle that keeps it out of reach of idle eviction.
pub struct WaiterGuard {
    session: Arc<Session>,
}

impl Deref for WaiterGuard {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.session
    }
}

impl Drop for WaiterGuard {
    fn drop(&mut self) {
        self.session.waiters.fetch_sub(1, Ordering::Relaxed);
        self.session.touch();
    }
}

//! The four coordination operations: create, join, await join, relay.
//!
//! `Coordinator` is a cheap handle. Build one per process and clone it into
//! whatever serves requests. All waiting happens on the calling task; an
//! unrelated session, or the other direction of the same session, is never
//! blocked by it.
//!
//! Every suspending call takes an optional timeout. `None` waits for as
//! long as it takes, which can be forever if the other player never shows
//! up. Dropping the returned future cancels the wait cleanly.
//!
//! Turn order is not checked. Slot 0 and slot 1 are expected to alternate;
//! a client that relays twice in a row from the same slot simply waits for
//! its first move to be picked up.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use bigtac_core::{SessionId, Slot};

use crate::error::CoordinatorError;
use crate::eviction::EvictionPolicy;
use crate::registry::SessionRegistry;
use crate::session::{Move, Session, SessionSummary};

/// Result of a successful relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The opponent's next move. `game_over` is set when that move ended
    /// the game, in which case the session is already finished.
    Reply { payload: String, game_over: bool },
    /// The relayed move ended the game; no reply is awaited.
    GameOver,
}

impl From<Move> for RelayOutcome {
    fn from(m: Move) -> Self {
        RelayOutcome::Reply {
            payload: m.payload,
            game_over: m.game_over,
        }
    }
}

#[derive(Clone)]
pub struct Coordinator {
    registry: SessionRegistry,
    shutdown: Arc<watch::Sender<bool>>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    pub fn new() -> Self {
        Self::with_registry(SessionRegistry::new())
    }

    pub fn with_registry(registry: SessionRegistry) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            registry,
            shutdown: Arc::new(shutdown),
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Start a session with `player` in slot 0.
    pub fn create(&self, player: String) -> SessionId {
        let id = self.registry.create(player);
        tracing::info!(session_id = id, "session created");
        id
    }

    pub fn get(&self, id: SessionId) -> Result<Arc<Session>, CoordinatorError> {
        self.registry.get(id)
    }

    /// Put `player` in slot 1 and return the name of the player in slot 0.
    pub fn join(&self, id: SessionId, player: String) -> Result<String, CoordinatorError> {
        let session = self.registry.get(id)?;
        let first = session.join(player).map_err(|e| {
            tracing::warn!(session_id = id, error = %e, "join rejected");
            e
        })?;
        tracing::info!(session_id = id, "second player joined");
        Ok(first.to_string())
    }

    /// Wait for the second player and return their name.
    ///
    /// The join signal is delivered once. A second call on the same session
    /// waits until its timeout (or forever, with no timeout).
    pub async fn await_join(
        &self,
        id: SessionId,
        timeout: Option<Duration>,
    ) -> Result<String, CoordinatorError> {
        let session = self.registry.checkout(id)?;
        let second = self.bounded(id, timeout, session.joined()).await?;
        tracing::debug!(session_id = id, "join observed");
        Ok(second)
    }

    /// Hand `payload` to the opponent of `from`, then wait for their answer.
    ///
    /// Waits first if the opponent has not yet picked up the previous move
    /// from this slot. With `is_final` set, the session is marked finished
    /// before the move is handed over, and the call returns as soon as it
    /// is delivered. The opponent sees the move with `game_over` set.
    ///
    /// A `TimedOut` while waiting for the answer means the move itself was
    /// delivered; a `TimedOut` before that means it was not. A final move
    /// that is not delivered still leaves the session finished.
    pub async fn relay(
        &self,
        id: SessionId,
        from: Slot,
        payload: String,
        is_final: bool,
        timeout: Option<Duration>,
    ) -> Result<RelayOutcome, CoordinatorError> {
        let session = self.registry.checkout(id)?;
        let open = if is_final {
            session.finish()
        } else {
            !session.is_finished()
        };
        if !open {
            return Err(CoordinatorError::Finished(id));
        }

        let outbox = session.inbound(from.opponent());
        self.bounded(id, timeout, outbox.send(Move::new(payload, is_final)))
            .await
            .inspect_err(|e| {
                tracing::warn!(session_id = id, slot = %from, error = %e, "move not delivered")
            })?;
        session.record_move();

        if is_final {
            tracing::info!(session_id = id, slot = %from, moves = session.moves(), "game over");
            return Ok(RelayOutcome::GameOver);
        }

        let reply = self
            .bounded(id, timeout, session.inbound(from).recv())
            .await
            .inspect_err(|e| tracing::warn!(session_id = id, slot = %from, error = %e, "no reply"))?;
        tracing::debug!(session_id = id, slot = %from, game_over = reply.game_over, "move relayed");
        Ok(reply.into())
    }

    /// Summaries of every session.
    pub fn sessions(&self) -> Vec<SessionSummary> {
        self.registry.snapshot()
    }

    /// Drop the sessions `policy` selects. Returns how many went.
    pub fn evict(&self, policy: &dyn EvictionPolicy) -> usize {
        let evicted = self.registry.evict(policy);
        if !evicted.is_empty() {
            tracing::info!(count = evicted.len(), ids = ?evicted, "sessions evicted");
        }
        evicted.len()
    }

    /// Wake every suspended call with `ShuttingDown` and refuse new waits.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Run `wait` under the caller's timeout and the shutdown signal.
    async fn bounded<F: Future>(
        &self,
        id: SessionId,
        timeout: Option<Duration>,
        wait: F,
    ) -> Result<F::Output, CoordinatorError> {
        let stop = self.shutdown.subscribe();
        if *stop.borrow() {
            return Err(CoordinatorError::ShuttingDown);
        }

        let limited = async {
            match timeout {
                Some(waited) => tokio::time::timeout(waited, wait)
                    .await
                    .map_err(|_| CoordinatorError::TimedOut { session: id, waited }),
                None => Ok(wait.await),
            }
        };

        tokio::select! {
            result = limited => result,
            _ = stopped(stop) => Err(CoordinatorError::ShuttingDown),
        }
    }
}

async fn stopped(mut stop: watch::Receiver<bool>) {
    // The sender outlives every call, so an error here cannot happen
    // before the flag flips; treat it as a stop either way.
    let _ = stop.wait_for(|stopping| *stopping).await;
}

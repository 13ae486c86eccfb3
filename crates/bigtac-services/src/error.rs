//! Error classification returned by every coordinator operation.

use std::time::Duration;

use bigtac_core::SessionId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinatorError {
    /// The id was never issued, or the session has been evicted.
    #[error("session {0} not found")]
    NotFound(SessionId),
    #[error("session {0} already has a second player")]
    AlreadyJoined(SessionId),
    #[error("session {0} has finished")]
    Finished(SessionId),
    /// A bounded wait expired before the counterpart acted.
    #[error("timed out after {waited:?} waiting on session {session}")]
    TimedOut { session: SessionId, waited: Duration },
    #[error("coordinator is shutting down")]
    ShuttingDown,
}

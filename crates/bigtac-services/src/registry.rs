//! Session registry — every live session, keyed by id.

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;

use bigtac_core::SessionId;

use crate::error::CoordinatorError;
use crate::eviction::EvictionPolicy;
use crate::ids::IdAllocator;
use crate::session::{Session, SessionSummary, WaiterGuard};

/// Shared map of sessions plus the id allocator feeding it.
///
/// Lookups hand out an `Arc<Session>` and release the map shard
/// immediately, so no map lock is ever held while a caller waits on a
/// mailbox.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<SessionId, Arc<Session>>>,
    ids: Arc<IdAllocator>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for `first` and return its id.
    ///
    /// The session is already visible to `get` when this returns.
    pub fn create(&self, first: String) -> SessionId {
        let id = self.ids.next_id();
        self.sessions.insert(id, Arc::new(Session::new(id, first)));
        id
    }

    pub fn get(&self, id: SessionId) -> Result<Arc<Session>, CoordinatorError> {
        self.sessions
            .get(&id)
            .map(|s| s.value().clone())
            .ok_or(CoordinatorError::NotFound(id))
    }

    /// Look up a session and register the caller as a waiter on it.
    ///
    /// The waiter is counted while the shard is still locked, and `evict`
    /// needs that same shard exclusively, so a sweep either removed the
    /// session before this call or sees the waiter and keeps it.
    pub fn checkout(&self, id: SessionId) -> Result<WaiterGuard, CoordinatorError> {
        self.sessions
            .get(&id)
            .map(|s| s.value().waiter())
            .ok_or(CoordinatorError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Summaries of every session, ordered by id.
    pub fn snapshot(&self) -> Vec<SessionSummary> {
        let mut all: Vec<_> = self.sessions.iter().map(|s| s.summary()).collect();
        all.sort_by_key(|s| s.game_id);
        all
    }

    /// Remove every session the policy selects. Returns the removed ids.
    ///
    /// Calls already holding a removed session keep it alive until they
    /// return; new lookups get `NotFound`.
    pub fn evict(&self, policy: &dyn EvictionPolicy) -> Vec<SessionId> {
        let now = Instant::now();
        let mut evicted = Vec::new();
        self.sessions.retain(|id, session| {
            let evict = policy.should_evict(session, now);
            if evict {
                evicted.push(*id);
            }
            !evict
        });
        evicted.sort_unstable();
        evicted
    }
}

//! Session eviction policies.
//!
//! The relay never tears a session down on its own. When a policy other
//! than `KeepForever` is configured, the daemon periodically asks the
//! registry to drop whatever the policy selects.

use std::time::{Duration, Instant};

use crate::session::Session;

pub trait EvictionPolicy: Send + Sync {
    /// Whether `session` should be removed from the registry at `now`.
    fn should_evict(&self, session: &Session, now: Instant) -> bool;
}

/// Sessions live for the whole process lifetime.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepForever;

impl EvictionPolicy for KeepForever {
    fn should_evict(&self, _session: &Session, _now: Instant) -> bool {
        false
    }
}

/// Drop sessions nobody has touched for `max_idle`.
///
/// A session with a call currently suspended on it is never idle, however
/// long that call has been waiting.
#[derive(Debug, Clone, Copy)]
pub struct IdleTimeout {
    pub max_idle: Duration,
}

impl IdleTimeout {
    pub fn new(max_idle: Duration) -> Self {
        Self { max_idle }
    }
}

impl EvictionPolicy for IdleTimeout {
    fn should_evict(&self, session: &Session, now: Instant) -> bool {
        session.waiters() == 0 && session.idle_for(now) >= self.max_idle
    }
}

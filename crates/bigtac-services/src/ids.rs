//! Session id allocation.

use std::sync::atomic::{AtomicU64, Ordering};

use bigtac_core::SessionId;

/// Hands out session ids: 1, 2, 3, ...
///
/// Ids are never reused and are not persisted, so a restarted relay
/// starts again from 1.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id. Strictly greater than every id returned before.
    pub fn next_id(&self) -> SessionId {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }
}

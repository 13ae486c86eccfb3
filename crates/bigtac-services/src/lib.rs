//! bigtac-services — the session coordination and move relay engine.
//!
//! Holds no game logic. Sessions pair two participants and hand opaque
//! move strings between them one at a time; the transport decides what
//! those strings mean.

pub mod coordinator;
pub mod error;
pub mod eviction;
pub mod ids;
pub mod mailbox;
pub mod registry;
pub mod session;

pub use coordinator::{Coordinator, RelayOutcome};
pub use error::CoordinatorError;
pub use eviction::{EvictionPolicy, IdleTimeout, KeepForever};
pub use ids::IdAllocator;
pub use mailbox::Mailbox;
pub use registry::SessionRegistry;
pub use session::{Move, Session, SessionState, SessionSummary, WaiterGuard};

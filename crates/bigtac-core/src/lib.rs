//! bigtac-core — shared types, request/response wire format, and configuration.
//! All other Big Tac crates depend on this one.

pub mod config;
pub mod wire;

pub use wire::{SessionId, Slot, WireError};

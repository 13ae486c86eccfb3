//! CLI command modules.

pub mod http;
pub mod play;
pub mod sessions;

//! Server-level tools.

pub mod ping;

pub use ping::{PingParams, PingTool};

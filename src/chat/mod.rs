//! Interactive lookup mode.
//!
//! Reads one line per lookup from stdin. Slash commands inspect or reload
//! settings. Typing a new line while a lookup is pending supersedes it.

/// Slash command parsing.
pub mod command;
mod session;
mod ui;

pub use session::ChatSession;

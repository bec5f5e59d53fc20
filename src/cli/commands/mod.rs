//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// One-shot lookup handler.
pub mod translate;

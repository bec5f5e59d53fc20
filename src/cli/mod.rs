//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

mod context;

pub use args::{Args, Command, ConfigureArgs, GlobalArgs};
pub use context::{UsageError, client_options, config_store, load_config};

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Hotkey, ProxyConfig, Theme};

#[derive(Parser, Debug)]
#[command(name = "lexi")]
#[command(about = "Look up words and sentences with an AI model")]
#[command(version)]
pub struct Args {
    /// Word or sentence to look up (reads from stdin if not provided)
    pub text: Vec<String>,

    /// Print every field: definition, examples, pronunciation, synonyms
    #[arg(short = 'f', long, conflicts_with = "json")]
    pub full: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by every command.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Settings file to use instead of ~/.config/lexi/config.json
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip TLS certificate verification (unsafe)
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Override the API endpoint URL
    #[arg(long, global = true, hide = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Suppress status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Show debug logs
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure lexi settings
    Configure(ConfigureArgs),
    /// Interactive lookup mode
    Chat,
}

#[derive(ClapArgs, Debug, Default)]
pub struct ConfigureArgs {
    /// Show current settings
    #[arg(long)]
    pub show: bool,

    /// Set the API key
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Route requests through an HTTP proxy (host:port)
    #[arg(long, value_name = "HOST:PORT", conflicts_with = "no_proxy")]
    pub proxy: Option<ProxyConfig>,

    /// Connect directly, without a proxy
    #[arg(long)]
    pub no_proxy: bool,

    /// Global shortcut, e.g. ctrl+shift+T
    #[arg(long, value_name = "KEYS", conflicts_with = "no_shortcut")]
    pub shortcut: Option<Hotkey>,

    /// Remove the global shortcut
    #[arg(long)]
    pub no_shortcut: bool,

    /// Color theme (light or dark)
    #[arg(long, value_name = "THEME")]
    pub theme: Option<Theme>,
}

impl ConfigureArgs {
    /// Returns `true` if any setting was given on the command line.
    pub const fn has_changes(&self) -> bool {
        self.api_key.is_some()
            || self.proxy.is_some()
            || self.no_proxy
            || self.shortcut.is_some()
            || self.no_shortcut
            || self.theme.is_some()
    }
}

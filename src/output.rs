//! Process-wide output settings.
//!
//! - Lookup results go to stdout so they can be piped
//! - Status lines, the spinner and `tracing` diagnostics go to stderr
//! - `--quiet` hides status lines and the spinner, never results or errors
//! - `--no-color` or a non-empty `NO_COLOR` (https://no-color.org/) turns
//!   styling off

use std::ffi::OsStr;
use std::sync::OnceLock;

use crate::config::Theme;

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub quiet: bool,
    pub no_color: bool,
    /// Accent used for values, from the user's settings.
    pub theme: Theme,
}

impl OutputConfig {
    /// Builds the settings from command-line flags and the environment.
    pub fn from_flags(quiet: bool, no_color: bool, theme: Theme) -> Self {
        Self {
            quiet,
            no_color: no_color || no_color_requested(std::env::var_os("NO_COLOR").as_deref()),
            theme,
        }
    }
}

fn no_color_requested(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Installs the settings. Only the first call has an effect.
pub fn init(config: OutputConfig) {
    if OUTPUT_CONFIG.set(config).is_err() {
        tracing::debug!("output already configured; ignoring");
    }
}

pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(|| OutputConfig::from_flags(false, false, Theme::default()))
}

pub fn is_quiet() -> bool {
    config().quiet
}

pub fn is_no_color() -> bool {
    config().no_color
}

pub fn theme() -> Theme {
    config().theme
}

/// Print a status line to stderr unless `--quiet` is set.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

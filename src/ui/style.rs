//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors. Colors are
//! skipped entirely when output is configured without them.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::config::Theme;
use crate::output;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Style for section headers (e.g., "Settings", "Examples")
    pub fn header<T: Display>(text: T) -> String {
        paint(text, |t| t.bold().to_string())
    }

    /// Style for labels/keys (e.g., "api key", "proxy")
    pub fn label<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().to_string())
    }

    /// Style for primary values; the accent follows the configured theme.
    pub fn value<T: Display>(text: T) -> String {
        match output::theme() {
            Theme::Light => paint(text, |t| t.blue().to_string()),
            Theme::Dark => paint(text, |t| t.cyan().to_string()),
        }
    }

    /// Style for the looked-up subject
    pub fn subject<T: Display>(text: T) -> String {
        paint(text, |t| t.bold().underline().to_string())
    }

    /// Style for secondary/supplementary info (e.g., endpoints, descriptions)
    pub fn secondary<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().to_string())
    }

    /// Style for success messages
    pub fn success<T: Display>(text: T) -> String {
        paint(text, |t| t.green().to_string())
    }

    /// Style for error messages
    pub fn error<T: Display>(text: T) -> String {
        paint(text, |t| t.red().bold().to_string())
    }

    /// Style for warning messages
    pub fn warning<T: Display>(text: T) -> String {
        paint(text, |t| t.yellow().to_string())
    }

    /// Style for commands (e.g., "/config", "/help")
    pub fn command<T: Display>(text: T) -> String {
        paint(text, |t| t.green().to_string())
    }

    /// Style for hints/help text
    pub fn hint<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().italic().to_string())
    }

    /// Style for version info
    pub fn version<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().to_string())
    }
}

fn paint<T: Display>(text: T, style: impl FnOnce(&T) -> String) -> String {
    if output::is_no_color() {
        text.to_string()
    } else {
        style(&text)
    }
}

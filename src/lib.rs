//! # lexi - word and sentence lookup through an AI model
//!
//! `lexi` sends a word or sentence to a Gemini `generateContent` endpoint and
//! turns the reply into a structured analysis: definition, examples,
//! pronunciation, a Persian translation, synonyms and acronym expansion.
//!
//! ## Pipeline
//!
//! ```text
//! text -> build_prompt -> TranslationClient::translate -> extract -> TranslationResult
//! ```
//!
//! [`lookup::LookupWorker`] runs that pipeline on its own task per request and
//! delivers the outcome over a channel, so a host UI never blocks on it.
//!
//! ## Quick Start
//!
//! ```bash
//! # Store the API key
//! lexi configure --api-key "$GEMINI_API_KEY"
//!
//! # Look up a word
//! lexi serendipity
//!
//! # Everything the model returned
//! lexi --full "break the ice"
//!
//! # Interactive mode
//! lexi chat
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/lexi/config.json`:
//!
//! ```json
//! {
//!   "api_key": "...",
//!   "proxy_ip": "127.0.0.1",
//!   "proxy_port": "8080",
//!   "shortcut": {"ctrl": true, "alt": false, "shift": true, "key": "T"},
//!   "theme": "Dark"
//! }
//! ```
//!
//! Keys lexi does not know about are kept when it saves the file.

/// Interactive lookup mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Settings persistence.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading and sanitizing.
pub mod input;

/// Background lookups with supersede semantics.
pub mod lookup;

/// Global output configuration (quiet mode, colors, theme).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Prompt building, the HTTP client, and reply extraction.
pub mod translation;

/// Terminal UI components (spinner, colors, result rendering).
pub mod ui;

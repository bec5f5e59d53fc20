//! Wiring shared by the command handlers: where settings live and how the
//! client is set up from the global flags.

use std::time::Duration;
use thiserror::Error;

use super::args::GlobalArgs;
use crate::config::{Config, ConfigStore};
use crate::translation::ClientOptions;
use crate::ui::Style;

/// The user asked for something that cannot be done with the given input.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

pub fn config_store(global: &GlobalArgs) -> ConfigStore {
    global
        .config
        .as_ref()
        .map_or_else(ConfigStore::new, ConfigStore::at)
}

/// Loads settings, printing a warning when defaults had to be used.
pub fn load_config(store: &ConfigStore) -> Config {
    let loaded = store.load();
    match &loaded.warning {
        Some(e) if e.is_missing() => tracing::debug!("{e}; using defaults"),
        Some(e) => eprintln!("{} {e}; using defaults", Style::warning("Warning:")),
        None => {}
    }
    loaded.config
}

pub fn client_options(global: &GlobalArgs) -> ClientOptions {
    let mut options = ClientOptions {
        accept_invalid_certs: global.insecure,
        ..ClientOptions::default()
    };
    if let Some(secs) = global.timeout {
        options.timeout = Duration::from_secs(secs.max(1));
    }
    if let Some(endpoint) = &global.endpoint {
        options.endpoint.clone_from(endpoint);
    }
    options
}

//! Persisted settings: the API key, proxy, shortcut and theme.

mod manager;
mod model;

pub use manager::{CONFIG_FILE_NAME, ConfigLoadError, ConfigSaveError, ConfigStore, Loaded};
pub use model::{Config, DEFAULT_HOTKEY_KEY, Hotkey, ProxyConfig, Theme};

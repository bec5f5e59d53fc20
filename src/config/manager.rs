use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

use super::model::{Config, DEFAULT_HOTKEY_KEY, Hotkey, ProxyConfig, Theme};
use crate::{fs, paths};

/// File name of the settings document inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

const KEY_API_KEY: &str = "api_key";
const KEY_PROXY_IP: &str = "proxy_ip";
const KEY_PROXY_PORT: &str = "proxy_port";
const KEY_SHORTCUT: &str = "shortcut";
const KEY_THEME: &str = "theme";

/// Why the settings document could not be used. Never fatal: loading falls
/// back to [`Config::default`] and reports this as a warning.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file {} does not contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },
}

impl ConfigLoadError {
    /// A missing file is the normal first-run state, not something to warn about.
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigSaveError {
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to create config directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The existing file could not be read, so its other keys cannot be kept.
    #[error("Refusing to overwrite unreadable config file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of [`ConfigStore::load`]: always a usable config, plus the reason
/// the defaults were used when the document could not be read.
#[derive(Debug)]
pub struct Loaded {
    pub config: Config,
    pub warning: Option<ConfigLoadError>,
}

/// Loads and saves the JSON settings document.
///
/// The store remembers the last document it read so that [`save`](Self::save)
/// only touches the keys it models and writes everything else back unchanged.
pub struct ConfigStore {
    path: PathBuf,
    document: Mutex<Option<Map<String, Value>>>,
}

impl ConfigStore {
    /// Creates a store for the default location.
    ///
    /// Settings live at `$XDG_CONFIG_HOME/lexi/config.json`
    /// or `~/.config/lexi/config.json` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self::at(paths::config_dir().join(CONFIG_FILE_NAME))
    }

    /// Creates a store backed by an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, falling back to defaults on any error.
    ///
    /// A file that exists but cannot be read is not remembered, so a later
    /// [`save`](Self::save) refuses to replace it instead of dropping its keys.
    pub fn load(&self) -> Loaded {
        let (document, warning) = match self.read_document() {
            Ok(document) => (Some(document), None),
            Err(e @ ConfigLoadError::Read { .. }) => (None, Some(e)),
            Err(e) => (Some(Map::new()), Some(e)),
        };

        let config = document
            .as_ref()
            .map(config_from_document)
            .unwrap_or_default();
        *self.lock() = document;

        tracing::debug!(path = %self.path.display(), "loaded config");
        Loaded { config, warning }
    }

    /// Writes `config` into the last-loaded document and persists it atomically.
    ///
    /// Keys the store does not model are preserved. If nothing was loaded yet,
    /// the document on disk is read first; a missing or corrupt file starts
    /// from an empty document, an unreadable one is left alone.
    pub fn save(&self, config: &Config) -> Result<(), ConfigSaveError> {
        let mut guard = self.lock();
        let mut document = match guard.take() {
            Some(document) => document,
            None => match self.read_document() {
                Ok(document) => document,
                Err(ConfigLoadError::Read { path, source }) => {
                    return Err(ConfigSaveError::Unreadable { path, source });
                }
                Err(_) => Map::new(),
            },
        };

        merge_into_document(&mut document, config);
        let result = self.write_document(&document);
        *guard = Some(document);
        drop(guard);

        if result.is_ok() {
            tracing::debug!(path = %self.path.display(), "saved config");
        }
        result
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Map<String, Value>>> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_document(&self) -> Result<Map<String, Value>, ConfigLoadError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigLoadError::Missing {
                    path: self.path.clone(),
                }
            } else {
                ConfigLoadError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let value: Value =
            serde_json::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
                path: self.path.clone(),
                source,
            })?;

        match value {
            Value::Object(document) => Ok(document),
            _ => Err(ConfigLoadError::NotAnObject {
                path: self.path.clone(),
            }),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), ConfigSaveError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| ConfigSaveError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_json::to_string_pretty(document)?;

        fs::atomic_write(&self.path, &contents).map_err(|source| ConfigSaveError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the modelled fields, falling back to defaults field by field.
/// A field of the wrong type counts as absent.
fn config_from_document(document: &Map<String, Value>) -> Config {
    let api_key = string_field(document, KEY_API_KEY).unwrap_or_default();

    let proxy = match (
        string_field(document, KEY_PROXY_IP),
        string_field(document, KEY_PROXY_PORT),
    ) {
        (Some(host), Some(port)) => ProxyConfig::new(&host, &port),
        _ => None,
    };

    let hotkey = document
        .get(KEY_SHORTCUT)
        .and_then(Value::as_object)
        .map(hotkey_from_object);

    let theme = string_field(document, KEY_THEME)
        .and_then(|s| s.parse::<Theme>().ok())
        .unwrap_or_default();

    Config {
        api_key,
        proxy,
        hotkey,
        theme,
    }
}

fn hotkey_from_object(shortcut: &Map<String, Value>) -> Hotkey {
    let flag = |name: &str| shortcut.get(name).and_then(Value::as_bool).unwrap_or(false);

    let key = shortcut
        .get("key")
        .and_then(Value::as_str)
        .and_then(Hotkey::normalize_key)
        .unwrap_or(DEFAULT_HOTKEY_KEY);

    Hotkey::new(flag("ctrl"), flag("alt"), flag("shift"), key).unwrap_or_default()
}

fn string_field(document: &Map<String, Value>, key: &str) -> Option<String> {
    match document.get(key)? {
        Value::String(s) => Some(s.clone()),
        other => {
            tracing::debug!(key, value = %other, "ignoring config field with unexpected type");
            None
        }
    }
}

fn merge_into_document(document: &mut Map<String, Value>, config: &Config) {
    document.insert(KEY_API_KEY.to_string(), Value::from(config.api_key.as_str()));

    match &config.proxy {
        Some(proxy) => {
            document.insert(KEY_PROXY_IP.to_string(), Value::from(proxy.host()));
            document.insert(KEY_PROXY_PORT.to_string(), Value::from(proxy.port()));
        }
        None => {
            document.remove(KEY_PROXY_IP);
            document.remove(KEY_PROXY_PORT);
        }
    }

    match &config.hotkey {
        Some(hotkey) => {
            // Update in place so extra keys inside "shortcut" survive too.
            let entry = document
                .entry(KEY_SHORTCUT)
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(shortcut) = entry {
                shortcut.insert("ctrl".to_string(), Value::from(hotkey.ctrl));
                shortcut.insert("alt".to_string(), Value::from(hotkey.alt));
                shortcut.insert("shift".to_string(), Value::from(hotkey.shift));
                shortcut.insert("key".to_string(), Value::from(hotkey.key().to_string()));
            }
        }
        None => {
            document.remove(KEY_SHORTCUT);
        }
    }

    document.insert(KEY_THEME.to_string(), Value::from(config.theme.as_str()));
}

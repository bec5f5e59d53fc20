use std::fmt;
use std::str::FromStr;

/// Settings shared by the lookup pipeline and the host shell.
///
/// `api_key` and `proxy` feed the translation client; `hotkey` and `theme`
/// are carried for the host and round-tripped untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Credential for the upstream endpoint. Empty means "unconfigured".
    pub api_key: String,
    /// HTTP proxy every request is routed through, when set.
    pub proxy: Option<ProxyConfig>,
    /// Global shortcut binding for the host shell.
    pub hotkey: Option<Hotkey>,
    /// Colour theme for the host shell.
    pub theme: Theme,
}

impl Config {
    /// Returns `true` once an API key has been entered.
    pub const fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Proxy host and port, both kept as the strings the user typed.
///
/// Both parts are trimmed and non-empty, which is exactly what the store
/// reads back as a configured proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    host: String,
    port: String,
}

impl ProxyConfig {
    /// Returns `None` if the host or port is blank.
    pub fn new(host: &str, port: &str) -> Option<Self> {
        let (host, port) = (host.trim(), port.trim());
        if host.is_empty() || port.is_empty() {
            return None;
        }
        Some(Self {
            host: host.to_string(),
            port: port.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    /// Proxy URL in the form `http://host:port`.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for ProxyConfig {
    type Err = String;

    /// Parses `host:port`. The port must be numeric.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("http://").unwrap_or(s);
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("Invalid proxy '{s}': expected host:port"))?;

        if host.is_empty() {
            return Err(format!("Invalid proxy '{s}': host is empty"));
        }
        if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("Invalid proxy '{s}': port must be a number"));
        }

        Self::new(host, port).ok_or_else(|| format!("Invalid proxy '{s}': host is empty"))
    }
}

/// Key used when a stored shortcut has no usable key.
pub const DEFAULT_HOTKEY_KEY: char = 'T';

/// A global shortcut: modifier flags plus a single upper-case letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    key: char,
}

impl Hotkey {
    /// Returns `None` unless `key` is an ASCII letter; lower case is upper-cased.
    pub fn new(ctrl: bool, alt: bool, shift: bool, key: char) -> Option<Self> {
        key.is_ascii_alphabetic().then(|| Self {
            ctrl,
            alt,
            shift,
            key: key.to_ascii_uppercase(),
        })
    }

    pub const fn key(&self) -> char {
        self.key
    }

    /// Normalizes a shortcut key: a single ASCII letter, upper-cased.
    pub fn normalize_key(key: &str) -> Option<char> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
            _ => None,
        }
    }
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            ctrl: false,
            alt: false,
            shift: false,
            key: DEFAULT_HOTKEY_KEY,
        }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.alt {
            f.write_str("alt+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for Hotkey {
    type Err = String;

    /// Parses shortcuts such as `ctrl+shift+T`. Modifiers may come in any order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut hotkey = Self::default();
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => hotkey.ctrl = true,
                "alt" => hotkey.alt = true,
                "shift" => hotkey.shift = true,
                _ => {
                    if key.is_some() {
                        return Err(format!("Invalid shortcut '{s}': more than one key"));
                    }
                    key = Some(Self::normalize_key(part).ok_or_else(|| {
                        format!("Invalid shortcut '{s}': key must be a single letter (A-Z)")
                    })?);
                }
            }
        }

        hotkey.key = key.ok_or_else(|| format!("Invalid shortcut '{s}': missing key"))?;
        Ok(hotkey)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Name as written to the config document.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("Invalid theme '{s}': expected 'light' or 'dark'")),
        }
    }
}

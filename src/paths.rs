//! Where lexi keeps its settings.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "lexi";
const XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";

/// Returns the configuration directory for lexi.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/lexi`, if set to an absolute path
/// 2. `~/.config/lexi`
/// 3. the platform config directory, then `./.lexi`, when no home is known
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os(XDG_CONFIG_HOME) {
        let xdg = Path::new(&xdg);
        if xdg.is_absolute() {
            return xdg.join(APP_DIR);
        }
        tracing::debug!(value = %xdg.display(), "ignoring non-absolute {XDG_CONFIG_HOME}");
    }

    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
        .map_or_else(|| PathBuf::from(".lexi"), |base| base.join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_xdg<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let original = std::env::var_os(XDG_CONFIG_HOME);
        match value {
            Some(v) => unsafe { std::env::set_var(XDG_CONFIG_HOME, v) },
            None => unsafe { std::env::remove_var(XDG_CONFIG_HOME) },
        }

        let result = f();

        match original {
            Some(v) => unsafe { std::env::set_var(XDG_CONFIG_HOME, v) },
            None => unsafe { std::env::remove_var(XDG_CONFIG_HOME) },
        }
        result
    }

    #[test]
    #[serial]
    fn test_config_dir_default() {
        let dir = with_xdg(None, config_dir);
        assert!(dir.ends_with(".config/lexi"));
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        let dir = with_xdg(Some("/custom/config"), config_dir);
        assert_eq!(dir, PathBuf::from("/custom/config/lexi"));
    }

    #[test]
    #[serial]
    fn test_config_dir_ignores_relative_xdg() {
        let dir = with_xdg(Some("relative/dir"), config_dir);
        assert!(!dir.starts_with("relative"));
        assert!(dir.ends_with("lexi"));
    }

    #[test]
    #[serial]
    fn test_config_dir_ignores_empty_xdg() {
        let dir = with_xdg(Some(""), config_dir);
        assert!(dir.ends_with(".config/lexi"));
    }
}

//! Configure command handler for editing settings.

use anyhow::Result;
use inquire::validator::Validation;
use inquire::{Confirm, MultiSelect, Password, PasswordDisplayMode, Select, Text};

use crate::cli::ConfigureArgs;
use crate::config::{Config, ConfigStore, Hotkey, ProxyConfig, Theme};
use crate::ui::{Style, handle_prompt_cancellation, mask_secret};

const MODIFIERS: [&str; 3] = ["Ctrl", "Alt", "Shift"];

/// Runs the configure command.
///
/// `--show` prints the current settings. Any other flag is applied directly;
/// with no flags the user is prompted for each setting.
pub fn run_configure(args: &ConfigureArgs, store: &ConfigStore, config: Config) -> Result<()> {
    if args.has_changes() {
        let updated = apply_changes(config, args);
        save(store, &updated)?;
        if args.show {
            print_settings(store, &updated);
        }
        return Ok(());
    }

    if args.show {
        print_settings(store, &config);
        return Ok(());
    }

    handle_prompt_cancellation(|| run_configure_interactive(store, config))
}

/// Applies the settings given as flags on top of `config`.
pub fn apply_changes(mut config: Config, args: &ConfigureArgs) -> Config {
    if let Some(api_key) = &args.api_key {
        config.api_key = api_key.trim().to_string();
    }
    if let Some(proxy) = &args.proxy {
        config.proxy = Some(proxy.clone());
    }
    if args.no_proxy {
        config.proxy = None;
    }
    if let Some(hotkey) = args.shortcut {
        config.hotkey = Some(hotkey);
    }
    if args.no_shortcut {
        config.hotkey = None;
    }
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    config
}

fn save(store: &ConfigStore, config: &Config) -> Result<()> {
    store.save(config)?;
    println!(
        "{} Settings saved to {}",
        Style::success("✓"),
        Style::secondary(store.path().display())
    );
    Ok(())
}

fn prompt_settings(current: Config) -> Result<Config> {
    let api_key = prompt_api_key(&current.api_key)?;
    let proxy = prompt_proxy(current.proxy.as_ref())?;
    let hotkey = prompt_hotkey(current.hotkey.as_ref())?;
    let theme = prompt_theme(current.theme)?;

    Ok(Config {
        api_key,
        proxy,
        hotkey,
        theme,
    })
}

fn run_configure_interactive(store: &ConfigStore, current: Config) -> Result<()> {
    print_settings(store, &current);
    let updated = prompt_settings(current)?;
    println!();
    save(store, &updated)
}

fn print_settings(store: &ConfigStore, config: &Config) {
    let not_set = || Style::secondary("(not set)");

    println!("{}", Style::header("Current settings"));
    println!(
        "  {}  {}",
        Style::label("api key "),
        if config.has_api_key() {
            Style::value(mask_secret(&config.api_key))
        } else {
            not_set()
        }
    );
    println!(
        "  {}  {}",
        Style::label("proxy   "),
        config
            .proxy
            .as_ref()
            .map_or_else(not_set, |p| Style::value(p.url()))
    );
    println!(
        "  {}  {}",
        Style::label("shortcut"),
        config.hotkey.map_or_else(not_set, Style::value)
    );
    println!("  {}  {}", Style::label("theme   "), Style::value(config.theme));
    println!(
        "  {}  {}",
        Style::label("file    "),
        Style::secondary(store.path().display())
    );
    println!();
}

fn prompt_api_key(current: &str) -> Result<String> {
    let mut prompt = Password::new("API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked);
    if !current.is_empty() {
        prompt = prompt.with_help_message("Leave empty to keep the current key");
    }

    let entered = prompt.prompt()?;
    let entered = entered.trim();

    Ok(if entered.is_empty() {
        current.to_string()
    } else {
        entered.to_string()
    })
}

fn prompt_proxy(current: Option<&ProxyConfig>) -> Result<Option<ProxyConfig>> {
    let use_proxy = Confirm::new("Route requests through an HTTP proxy?")
        .with_default(current.is_some())
        .prompt()?;
    if !use_proxy {
        return Ok(None);
    }

    let mut host = Text::new("Proxy host:").with_validator(|input: &str| {
        Ok(if input.trim().is_empty() {
            Validation::Invalid("Host cannot be empty".into())
        } else {
            Validation::Valid
        })
    });
    if let Some(p) = current {
        host = host.with_default(p.host());
    }
    let host = host.prompt()?;

    let mut port = Text::new("Proxy port:").with_validator(|input: &str| {
        let input = input.trim();
        Ok(
            if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
                Validation::Valid
            } else {
                Validation::Invalid("Port must be a number".into())
            },
        )
    });
    if let Some(p) = current {
        port = port.with_default(p.port());
    }
    let port = port.prompt()?;

    Ok(ProxyConfig::new(&host, &port))
}

fn prompt_hotkey(current: Option<&Hotkey>) -> Result<Option<Hotkey>> {
    let enable = Confirm::new("Set a global shortcut?")
        .with_default(current.is_some())
        .prompt()?;
    if !enable {
        return Ok(None);
    }

    let current = current.copied().unwrap_or_default();
    let defaults: Vec<usize> = [current.ctrl, current.alt, current.shift]
        .iter()
        .enumerate()
        .filter_map(|(i, on)| on.then_some(i))
        .collect();

    let modifiers = MultiSelect::new("Modifiers:", MODIFIERS.to_vec())
        .with_default(&defaults)
        .prompt()?;

    let current_key = current.key().to_string();
    let key = Text::new("Key (A-Z):")
        .with_default(&current_key)
        .with_validator(|input: &str| {
            Ok(if Hotkey::normalize_key(input.trim()).is_some() {
                Validation::Valid
            } else {
                Validation::Invalid("Please enter a single letter (A-Z)".into())
            })
        })
        .prompt()?;

    let key = Hotkey::normalize_key(key.trim()).unwrap_or(current.key());
    Ok(Hotkey::new(
        modifiers.contains(&"Ctrl"),
        modifiers.contains(&"Alt"),
        modifiers.contains(&"Shift"),
        key,
    ))
}

fn prompt_theme(current: Theme) -> Result<Theme> {
    let options = vec![Theme::Light, Theme::Dark];
    let starting = options.iter().position(|t| *t == current).unwrap_or(0);

    Ok(Select::new("Theme:", options)
        .with_starting_cursor(starting)
        .prompt()?)
}

//! Chat mode UI components.

use std::io::{self, Write};

use super::command::SLASH_COMMANDS;
use crate::config::Config;
use crate::ui::{Style, mask_secret};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    println!(
        "{} {} - Interactive Lookup Mode",
        Style::header("lexi"),
        Style::version(format!("v{VERSION}"))
    );
    println!(
        "{}",
        Style::hint("Type a word or sentence, /help for commands, /quit to exit")
    );
    println!();
}

pub fn print_prompt() {
    print!("{} ", Style::command("❯"));
    let _ = io::stdout().flush();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(config: &Config, endpoint: &str, full: bool) {
    println!("{}", Style::header("Settings"));
    println!(
        "  {}  {}",
        Style::label("api key "),
        Style::value(mask_secret(&config.api_key))
    );
    println!(
        "  {}  {}",
        Style::label("proxy   "),
        config
            .proxy
            .as_ref()
            .map_or_else(|| Style::secondary("(direct)"), |p| Style::value(p.url()))
    );
    println!("  {}  {}", Style::label("theme   "), Style::value(config.theme));
    println!(
        "  {}  {}",
        Style::label("output  "),
        Style::value(if full { "full" } else { "short" })
    );
    println!("  {}  {}", Style::label("endpoint"), Style::secondary(endpoint));
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    for (cmd, desc) in SLASH_COMMANDS {
        println!(
            "  {}  {}",
            Style::command(format!("{cmd:<8}")),
            Style::secondary(desc)
        );
    }
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}

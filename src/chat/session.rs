use anyhow::Result;
use std::io::{self, BufRead};
use tokio::sync::mpsc;

use super::command::{Input, SlashCommand, parse_input};
use super::ui;
use crate::config::{Config, ConfigStore};
use crate::input::sanitize;
use crate::lookup::{LookupEvent, LookupWorker};
use crate::status;
use crate::translation::{ClientOptions, TranslationClient};
use crate::ui::{Style, print_result};

/// An interactive lookup session.
///
/// Provides a REPL-style interface. Lines are read on a dedicated thread so
/// a pending lookup never blocks the prompt.
pub struct ChatSession {
    store: ConfigStore,
    options: ClientOptions,
    config: Config,
    worker: LookupWorker,
    events: mpsc::UnboundedReceiver<LookupEvent>,
    full: bool,
}

impl ChatSession {
    /// Creates a session from loaded settings. Fails if no client can be
    /// built from them (e.g. no API key yet).
    pub fn new(store: ConfigStore, config: Config, options: ClientOptions) -> Result<Self> {
        let client = TranslationClient::new(&config, options.clone())?;
        let (worker, events) = LookupWorker::new(client);

        Ok(Self {
            store,
            options,
            config,
            worker,
            events,
            full: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header();
        ui::print_prompt();

        let mut lines = spawn_line_reader();

        loop {
            tokio::select! {
                line = lines.recv() => {
                    let Some(line) = line else { break };
                    if !self.handle_line(&line?) {
                        ui::print_goodbye();
                        return Ok(());
                    }
                }
                Some(event) = self.events.recv() => {
                    if let Some(event) = self.worker.accept(event) {
                        self.print_event(event);
                        ui::print_prompt();
                    }
                }
            }
        }

        // Input ended (e.g. piped stdin); let the last lookup finish.
        while self.worker.is_busy() {
            let Some(event) = self.events.recv().await else {
                break;
            };
            if let Some(event) = self.worker.accept(event) {
                self.print_event(event);
            }
        }

        println!();
        ui::print_goodbye();
        Ok(())
    }

    /// Returns `false` when the session should end.
    fn handle_line(&mut self, line: &str) -> bool {
        match parse_input(line) {
            Input::Empty => {}
            Input::Text(text) => {
                let text = sanitize(&text);
                if text.is_empty() {
                    ui::print_prompt();
                    return true;
                }
                if self.worker.is_busy() {
                    status!("{}", Style::hint("(previous lookup cancelled)"));
                }
                status!("{}", Style::secondary(format!("Looking up '{text}'...")));
                self.worker.submit(text);
                return true;
            }
            Input::Command(cmd) => {
                if !self.handle_command(cmd) {
                    return false;
                }
            }
        }
        ui::print_prompt();
        true
    }

    fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Config => {
                ui::print_config(&self.config, self.worker.client().endpoint(), self.full);
            }
            SlashCommand::Full => {
                self.full = !self.full;
                println!(
                    "{} {}",
                    Style::success("✓"),
                    if self.full {
                        "Full output enabled"
                    } else {
                        "Full output disabled"
                    }
                );
            }
            SlashCommand::Reload => self.reload(),
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return false,
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        true
    }

    /// Re-reads settings and rebuilds the client so no stale key or proxy is used.
    fn reload(&mut self) {
        let loaded = self.store.load();
        if let Some(e) = &loaded.warning {
            ui::print_error(&format!("{e}; keeping current settings"));
            return;
        }

        match TranslationClient::new(&loaded.config, self.options.clone()) {
            Ok(client) => {
                self.worker.set_client(client);
                self.config = loaded.config;
                println!("{} Settings reloaded", Style::success("✓"));
            }
            Err(e) => ui::print_error(&format!("{e}; keeping current settings")),
        }
    }

    fn print_event(&self, event: LookupEvent) {
        match event.outcome {
            Ok(result) => {
                print_result(&result, self.full);
                println!();
            }
            Err(e) => {
                crate::ui::print_error(&e);
                eprintln!();
            }
        }
    }
}

/// Reads stdin line by line on a plain thread.
///
/// A blocking read inside the runtime would keep the process alive after
/// `/quit` until another line arrived.
fn spawn_line_reader() -> mpsc::UnboundedReceiver<io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

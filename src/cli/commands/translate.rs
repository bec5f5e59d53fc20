use anyhow::{Context, Result};

use crate::cli::UsageError;
use crate::config::Config;
use crate::input::{InputReader, sanitize};
use crate::lookup::LookupWorker;
use crate::translation::{ClientOptions, TranslationClient};
use crate::ui::{self, Spinner};

pub struct TranslateOptions {
    pub text: Vec<String>,
    pub full: bool,
    pub json: bool,
    pub client: ClientOptions,
}

/// Looks up one word or sentence and prints the result.
pub async fn run_translate(options: TranslateOptions, config: &Config) -> Result<()> {
    let text = sanitize(&InputReader::read(&options.text)?);
    if text.is_empty() {
        return Err(UsageError("Please enter a word.".to_string()).into());
    }

    let client = TranslationClient::new(config, options.client)?;
    let (mut worker, mut events) = LookupWorker::new(client);
    let spinner = Spinner::lookup(&text);
    worker.submit(text);

    let event = events
        .recv()
        .await
        .and_then(|event| worker.accept(event))
        .context("Lookup task ended without a result")?;
    spinner.stop();

    let result = event.outcome?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        ui::print_result(&result, options.full);
    }

    Ok(())
}

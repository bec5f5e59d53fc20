use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lexi_cli::chat::ChatSession;
use lexi_cli::cli::commands::{configure, translate};
use lexi_cli::cli::{
    Args, Command, GlobalArgs, UsageError, client_options, config_store, load_config,
};
use lexi_cli::config::ConfigSaveError;
use lexi_cli::output::{self, OutputConfig};
use lexi_cli::translation::{LookupError, TranslationError};
use lexi_cli::ui::{self, Style};

/// Environment variable holding a `tracing` filter, e.g. `LEXI_LOG=debug`.
const LOG_ENV: &str = "LEXI_LOG";

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(&args.global);

    if let Err(e) = run(args).await {
        match e.downcast_ref::<LookupError>() {
            Some(lookup_error) => ui::print_error(lookup_error),
            None => eprintln!("{} {e:#}", Style::error("Error:")),
        }
        std::process::exit(exit_code(&e));
    }
}

async fn run(args: Args) -> Result<()> {
    let global = args.global;
    let store = config_store(&global);
    let config = load_config(&store);

    output::init(OutputConfig::from_flags(
        global.quiet,
        global.no_color,
        config.theme,
    ));

    match args.command {
        Some(Command::Configure(configure_args)) => {
            configure::run_configure(&configure_args, &store, config)?;
        }
        Some(Command::Chat) => {
            let mut session = ChatSession::new(store, config, client_options(&global))?;
            session.run().await?;
        }
        None => {
            let options = translate::TranslateOptions {
                text: args.text,
                full: args.full,
                json: args.json,
                client: client_options(&global),
            };
            translate::run_translate(options, &config).await?;
        }
    }

    Ok(())
}

fn init_tracing(global: &GlobalArgs) {
    let filter = if global.verbose {
        EnvFilter::new("lexi_cli=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn exit_code(e: &anyhow::Error) -> exitcode::ExitCode {
    if let Some(lookup_error) = e.downcast_ref::<LookupError>() {
        return match lookup_error {
            LookupError::Translation(t) => translation_exit_code(t),
            LookupError::Extraction(_) => exitcode::DATAERR,
        };
    }
    if let Some(t) = e.downcast_ref::<TranslationError>() {
        return translation_exit_code(t);
    }
    if e.downcast_ref::<ConfigSaveError>().is_some() {
        return exitcode::CONFIG;
    }
    if e.downcast_ref::<UsageError>().is_some() {
        return exitcode::USAGE;
    }
    exitcode::SOFTWARE
}

const fn translation_exit_code(e: &TranslationError) -> exitcode::ExitCode {
    match e {
        TranslationError::Network(_) => exitcode::UNAVAILABLE,
        TranslationError::UpstreamFormat(_) => exitcode::DATAERR,
        TranslationError::MissingApiKey | TranslationError::InvalidConfig(_) => exitcode::CONFIG,
    }
}

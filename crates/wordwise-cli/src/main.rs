//! Wordwise CLI - dictionary lookup server and command-line client
//!
//! This is the main entry point for the `wordwise` binary, providing the
//! HTTP server in front of the upstream dictionary plus one-shot lookups
//! and saved-word listing from the terminal.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;
mod server;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // A missing .env file is normal
    dotenv::dotenv().ok();

    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, !cli.no_color),
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, config).await {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e, use_color),
    }
}

fn exit_with(e: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(e, use_color));

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip_all, fields(command = command_name(&cli.command)))]
async fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(
        cli.output,
        cli.use_color() && config.output.color,
        cli.quiet,
        config.output.progress,
    );

    tracing::info!(verbosity = cli.verbosity_level(), "Executing command");

    match cli.command {
        Commands::Serve(args) => handlers::handle_serve(args, &config, &mut output).await,
        Commands::Lookup(args) => handlers::handle_lookup(args, &config, &mut output).await,
        Commands::Saved(args) => handlers::handle_saved(args, &config, &mut output).await,
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output).await,
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Serve(_) => "serve",
        Commands::Lookup(_) => "lookup",
        Commands::Saved(_) => "saved",
        Commands::Config(_) => "config",
        Commands::Completions(_) => "completions",
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);
    logging_config.merge_with_file(&config.logging, verbosity);
    logging_config.merge_with_env();

    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

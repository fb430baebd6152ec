//! Specaudit CLI - Command-line interface for audit catalog validation
//!
//! This is the main entry point for the Specaudit CLI application, providing
//! commands for validating catalog specification files and inspecting the
//! schemas they are checked against.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::{Error, Result};
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Configuration feeds logging, so it is loaded first
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, !cli.no_color),
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    // Held until exit so buffered file logs are flushed
    let _log_guard = match init_logging(&cli, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    match run(cli, config, use_color).await {
        Ok(()) => process::exit(0),
        Err(e) => {
            if !e.is_reported() {
                eprintln!("{}", error::format_error(&e, use_color));
                if e.should_show_help() {
                    eprintln!("\nFor more information, try '--help'");
                }
            }
            process::exit(e.exit_code());
        }
    }
}

fn exit_with(error: &Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(error, use_color));
    process::exit(error.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
async fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = resolve_output_format(&cli, &config)?;
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, &config, &mut output).await,
        Commands::Schema(args) => handlers::handle_schema(args, &mut output),
        Commands::Types => handlers::handle_types(&mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// The `--output` flag wins over the configured format
fn resolve_output_format(cli: &Cli, config: &Config) -> Result<OutputFormat> {
    match cli.output {
        Some(format) => Ok(format),
        None => OutputFormat::from_config(&config.output.format).ok_or_else(|| {
            Error::config(format!(
                "Unknown output format '{}' (expected human, json, json-pretty or yaml)",
                config.output.format
            ))
        }),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<Option<WorkerGuard>> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);
    logging_config.merge_with_settings(&config.logging, verbosity);
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

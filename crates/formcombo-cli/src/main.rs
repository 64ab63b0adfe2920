//! formcombo CLI - inspect authoring dialogs and enumerate their configurations
//!
//! This is the main entry point for the formcombo CLI application, providing
//! commands for listing dialog fields, reporting them per tab, and
//! enumerating or planning their configurations.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Configuration comes first so its logging section can be honoured
    let config = Config::load_with_file(cli.config.as_deref());

    let use_color = cli.use_color() && config.as_ref().map_or(true, |c| c.output.color);
    control::set_override(use_color);

    let guard = match init_logging(&cli, config.as_ref().ok()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let result = config.and_then(|config| run(cli, &config, use_color));

    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", error::format_error(&e, use_color));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            e.exit_code()
        }
    };

    // Flush buffered log lines before exiting
    drop(guard);
    process::exit(code);
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet, config.output.progress);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        run_id = logging::current_run_id().unwrap_or("-"),
        "Executing command"
    );

    match cli.command {
        Commands::Fields(args) => handlers::handle_fields(args, config, &mut output),
        Commands::Report(args) => handlers::handle_report(args, &mut output),
        Commands::ReportAll(args) => handlers::handle_report_all(args, &mut output),
        Commands::Combinations(args) => handlers::handle_combinations(args, config, &mut output),
        Commands::Plan(args) => handlers::handle_plan(args, config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: Option<&Config>) -> Result<Option<WorkerGuard>> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    if let Some(config) = config {
        logging_config.merge_with_file(&config.logging, verbosity);
    }

    // Apply environment overrides
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["formcombo", "fields", "dialog.json"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["formcombo", "-vv", "combinations", "dialog.json", "--limit", "5"]);
        assert_eq!(cli.verbosity_level(), 2);
        match cli.command {
            Commands::Combinations(args) => assert_eq!(args.limit.map(|l| l.get()), Some(5)),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["formcombo", "--quiet", "report", "dialog.json"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let result = Cli::try_parse_from(["formcombo", "plan", "dialog.json", "--limit", "0"]);
        assert!(result.is_err());
    }
}

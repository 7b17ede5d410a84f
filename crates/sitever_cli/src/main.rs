//! sitever CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success (per-file failures are reported, not fatal)
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sitever_core::VersionError;

mod commands;

use commands::{Cli, CommandContext, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout.
            let code = if e.use_stderr() {
                ExitCodes::INVALID_ARGS
            } else {
                ExitCodes::SUCCESS
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging(cli.verbose, cli.quiet);

    let result = CommandContext::from_current_dir(cli.quiet).and_then(|ctx| {
        match cli.command.unwrap_or(Commands::Run) {
            Commands::Run => commands::run::execute(&ctx),
            Commands::Create => commands::create::execute(&ctx),
            Commands::Rename => commands::rename::execute(&ctx),
            Commands::Update => commands::update::execute(&ctx),
            Commands::Show => commands::show::execute(&ctx),
        }
    });

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Diagnostics go to stderr so stdout only carries progress output.
fn init_logging(verbose: bool, quiet: bool) {
    let default_directives = if verbose {
        "sitever=debug,sitever_core=debug,warn"
    } else if quiet {
        "warn"
    } else {
        "sitever=info,sitever_core=info,warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<VersionError>() {
        Some(err) if err.is_config_error() => ExitCodes::CONFIG_ERROR,
        _ => ExitCodes::GENERAL_ERROR,
    }
}

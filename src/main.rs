//! Lockwarden CLI entry point.
//!
//! Parses arguments, loads config, installs logging, dispatches to the
//! appropriate command handler, and maps errors to exit codes.

use lockwarden::cli::Cli;
use lockwarden::config::Config;
use lockwarden::{commands, exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let result = Config::load_or_default(cli.config.as_deref()).and_then(|config| {
        logging::init_tracing(&config.log_level);
        commands::dispatch(&config, cli.command)
    });

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

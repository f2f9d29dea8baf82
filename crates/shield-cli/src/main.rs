//! ticket-shield CLI
//!
//! Command-line interface for reversible support-ticket anonymization:
//! detect PII, replace it with placeholder tokens, and restore the original
//! text from a saved mapping file.

#![forbid(unsafe_code)]

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod output;

use commands::Cli;

fn main() -> ExitCode {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the command
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e);
            e.exit_code()
        }
    }
}

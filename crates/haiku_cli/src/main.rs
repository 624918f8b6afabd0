//! haiku CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Entry file not found
//! - 3: Evaluation error
//! - 4: Resource structure error

use std::process::ExitCode;

use clap::Parser;
use haiku_manifest::ManifestError;
use haiku_templator::TemplatorError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const ENTRY_NOT_FOUND: u8 = 2;
    pub const EVALUATION_ERROR: u8 = 3;
    pub const STRUCTURE_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "haiku=debug" } else { "haiku=info" };
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive(level.parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = cli.templator_config().and_then(|config| match cli.command {
        Commands::Show(args) => commands::show::execute(args, &config),
        Commands::List(args) => commands::list::execute(args, &config),
        Commands::Eval(args) => commands::eval::execute(args, &config),
    });

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<TemplatorError>() {
        return match err {
            TemplatorError::EntryNotFound { .. } => ExitCodes::ENTRY_NOT_FOUND,
            TemplatorError::Evaluation(_) | TemplatorError::Decode(_) => {
                ExitCodes::EVALUATION_ERROR
            }
            TemplatorError::Manifest(_) => ExitCodes::STRUCTURE_ERROR,
            TemplatorError::Config(_) | TemplatorError::Io(_) => ExitCodes::GENERAL_ERROR,
        };
    }

    match e.downcast_ref::<ManifestError>() {
        Some(ManifestError::UnknownFormat(_)) | None => ExitCodes::GENERAL_ERROR,
        Some(_) => ExitCodes::STRUCTURE_ERROR,
    }
}

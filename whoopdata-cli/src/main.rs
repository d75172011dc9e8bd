// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! whoopdata CLI - export WHOOP sleep, recovery and heart rate data.
//!
//! # Examples
//!
//! ```bash
//! # Export sleep and heart rate data for the last seven days
//! whoopdata
//!
//! # Export one week of sleep data
//! whoopdata --data-type sleep --from-date 2023-01-01 --to-date 2023-01-07
//!
//! # Heart rate sampled every minute, written to a chosen file
//! whoopdata -t heart_rate --step 60 -o hr.json
//!
//! # Sleep stage breakdown of the most recent night
//! whoopdata stages --format json
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use whoopdata_core::CoreError;
use whoopdata_fetch::FetchError;
use whoopdata_store::StoreError;
use whoopdata_sync::SyncError;

use commands::{export, stages};

// ============================================================================
// CLI Definition
// ============================================================================

/// whoopdata CLI - WHOOP data export.
#[derive(Parser)]
#[command(name = "whoopdata")]
#[command(about = "Extract sleep and heart rate data from WHOOP")]
#[command(long_about = r#"
whoopdata logs in to the WHOOP web API with your account credentials and
exports your data as JSON files.

Credentials come from --username/--password or the WHOOP_USERNAME and
WHOOP_PASSWORD environment variables.

Dates are YYYY-MM-DD. Without both --from-date and --to-date the last
seven days are exported.

Examples:
  whoopdata                                  # Sleep + heart rate, last 7 days
  whoopdata -t sleep --from-date 2023-01-01 --to-date 2023-01-07
  whoopdata -t recovery                      # Recovery vows
  whoopdata stages                           # Stage summary of last night
"#)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to run. If none, exports data.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Export options (used when no subcommand is given).
    #[command(flatten)]
    pub export: export::ExportArgs,

    /// WHOOP account username/email.
    #[arg(long, short, global = true)]
    pub username: Option<String>,

    /// WHOOP account password.
    #[arg(long, short, global = true)]
    pub password: Option<String>,

    /// Start date (YYYY-MM-DD).
    #[arg(long, global = true)]
    pub from_date: Option<String>,

    /// End date (YYYY-MM-DD).
    #[arg(long, global = true)]
    pub to_date: Option<String>,

    /// Settings file (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logging, minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Export data to JSON files (default if no command specified).
    #[command(visible_alias = "e")]
    Export(export::ExportArgs),

    /// Show the sleep stage breakdown of the most recent sleep.
    #[command(visible_alias = "s")]
    Stages(stages::StagesArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// No username or password available.
    CredentialsMissing = 2,
    /// A date argument did not parse.
    InvalidDate = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed run.
    pub fn for_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<StoreError>() {
                if e.is_credentials_missing() {
                    return Self::CredentialsMissing;
                }
            }
            if let Some(FetchError::CredentialsMissing) = cause.downcast_ref::<FetchError>() {
                return Self::CredentialsMissing;
            }
            if let Some(CoreError::InvalidDateFormat(_)) = cause.downcast_ref::<CoreError>() {
                return Self::InvalidDate;
            }
            match cause.downcast_ref::<SyncError>() {
                Some(SyncError::Core(CoreError::InvalidDateFormat(_))) => {
                    return Self::InvalidDate;
                }
                Some(SyncError::Fetch(FetchError::CredentialsMissing)) => {
                    return Self::CredentialsMissing;
                }
                _ => {}
            }
        }
        Self::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("whoopdata=debug,warn")
    } else {
        EnvFilter::new("whoopdata=info,warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Export(args)) => export::run(args, &cli).await,
        Some(Commands::Stages(args)) => stages::run(args, &cli).await,
        None => export::run(&cli.export, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

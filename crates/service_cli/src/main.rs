//! climate-risk - Command Line Operations for Climate-Adjusted Credit Risk
//!
//! This is the operational entry point for the climate risk workspace.
//!
//! # Commands
//!
//! - `climate-risk score --input <file> --scenario <name>` - Score a feature table
//! - `climate-risk compare --input <file>` - Compare every configured scenario
//! - `climate-risk validate --input <file>` - Data-quality checks
//! - `climate-risk scenarios` - List configured scenarios
//! - `climate-risk check` - Validate and print the effective configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer in the A-I-P-S architecture, this crate
//! orchestrates all other layers to provide a unified command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod io;
mod report;

pub use error::{CliError, Result};

use report::OutputFormat;

/// Climate-adjusted credit risk CLI
#[derive(Parser)]
#[command(name = "climate-risk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML); built-in defaults when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Ignore CLIMATE_RISK_* environment overrides
    #[arg(long, global = true)]
    ignore_env: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a feature table under one climate scenario
    Score {
        /// Path to the feature table (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Scenario name (e.g. Orderly, Disorderly, "Hot House")
        #[arg(short, long, default_value = "Orderly")]
        scenario: String,

        /// Scenario sensitivity
        #[arg(long, default_value = "1.0")]
        sensitivity: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Output file, or directory for a scenario-named report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show only the N riskiest companies
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Compare portfolio metrics across every configured scenario
    Compare {
        /// Path to the feature table (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Scenario sensitivity
        #[arg(long, default_value = "1.0")]
        sensitivity: f64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run data-quality checks on a feature table
    Validate {
        /// Path to the feature table (CSV)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List configured scenarios
    Scenarios,

    /// Validate and print the effective configuration
    Check,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        debug!("Verbose mode enabled");
    }

    let config = config::load(cli.config.as_deref(), cli.ignore_env)?;

    match cli.command {
        Commands::Score {
            input,
            scenario,
            sensitivity,
            format,
            output,
            top,
        } => commands::score::run(
            &config,
            &commands::score::ScoreOptions {
                input: &input,
                scenario: &scenario,
                sensitivity,
                format,
                output: output.as_deref(),
                top,
            },
        ),
        Commands::Compare {
            input,
            sensitivity,
            json,
        } => commands::compare::run(&config, &input, sensitivity, json),
        Commands::Validate { input } => commands::validate::run(&config, &input),
        Commands::Scenarios => commands::scenarios::run(&config),
        Commands::Check => commands::check::run(&config),
    }
}

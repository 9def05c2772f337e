use std::env;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{error, info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use tokio::runtime::Runtime;

use report_uploader::cli::{Args, Commands};
use report_uploader::config::{load_or_create_config, SubmissionConfig};
use report_uploader::constants::TOKEN_ENV_VAR;
use report_uploader::security::safe_error_message;
use report_uploader::submission::{SubmissionOutcome, Submitter};

fn main() -> ExitCode {
    // Parse arguments
    let args = Args::parse();

    // Initialize logging
    if let Err(e) = initialize_logging(args.verbose) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", safe_error_message("report-uploader failed", &format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the specified verbosity level
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ).context("Failed to initialize logger")?;
    Ok(())
}

/// Dispatch the subcommand; `Ok(false)` means the report was not delivered
fn run(args: &Args) -> Result<bool> {
    match &args.command {
        Commands::InitConfig { path } => {
            info!("Creating default configuration file at {}", path.display());
            SubmissionConfig::create_default_config_file(path)?;
            info!("Configuration created successfully");
            Ok(true)
        }
        Commands::Submit { summary, detail, token } => {
            let token = resolve_token(token.as_deref())?;
            submit(args.config.as_deref(), &token, summary, detail)
        }
    }
}

/// Token from the command line, else from the environment
fn resolve_token(cli_token: Option<&str>) -> Result<String> {
    match cli_token {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| anyhow!("No access token: pass --token or set {}", TOKEN_ENV_VAR)),
    }
}

fn submit(config_path: Option<&Path>, token: &str, summary: &str, detail: &str) -> Result<bool> {
    let config = load_or_create_config(config_path)?;
    info!("Using data directory {}", config.data_dir.display());

    let runtime = Runtime::new().context("Failed to create Tokio runtime")?;

    let outcome = runtime.block_on(async {
        let submitter = Submitter::new(config)?;
        submitter.submit(token, summary, detail).await
    })?;

    match outcome {
        SubmissionOutcome::Delivered(receipt) => {
            info!("Report uploaded to {} ({} bytes)", receipt.stored_path, receipt.size);
            Ok(true)
        }
        SubmissionOutcome::Busy => {
            warn!("Another submission is in progress");
            Ok(false)
        }
        SubmissionOutcome::ArchiveMissing => {
            warn!("Report archive was not created, nothing uploaded");
            Ok(false)
        }
        SubmissionOutcome::NotDelivered(e) => {
            warn!("Report was not delivered: {}", e);
            Ok(false)
        }
    }
}

//! # report-uploader
//!
//! Packages a user-submitted report together with the application's log
//! files into a zip archive and uploads it to cloud storage over an
//! authenticated HTTP API.
//!
//! ## Overview
//!
//! A submission is a short, strictly sequential pipeline:
//!
//! 1. Write the report text (`summary`, blank line, `detail`).
//! 2. Recreate the working directory and copy the logs and report into it.
//! 3. Compress the working directory into the archive, then delete it.
//! 4. Read the archive; abort when it is missing.
//! 5. Ensure the per-day remote folder exists, then upload the archive
//!    under a sanitized name derived from the summary.
//!
//! ## Usage
//!
//! ```no_run
//! use report_uploader::config::SubmissionConfig;
//! use report_uploader::submission::Submitter;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let submitter = Submitter::new(SubmissionConfig::default())?;
//! let outcome = submitter
//!     .submit("ACCESS_TOKEN", "Player fell through floor", "Near the north bridge")
//!     .await?;
//!
//! println!("Delivered: {}", outcome.is_delivered());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`models`]: Report and remote target types
//! - [`bundle`]: Report file, working directory and archive construction
//! - [`cloud`]: Remote path planning and the storage API client
//! - [`submission`]: The end-to-end workflow and the submit gate
//! - [`config`]: Configuration loading and defaults
//! - [`utils`]: Compression and hashing helpers
//! - [`security`]: Filename sanitizing and credential scrubbing
//! - [`constants`]: Application-wide constants

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Core data models
pub mod models;

/// Local archive construction
pub mod bundle;

/// Cloud storage integration
pub mod cloud;

/// Submission workflow orchestration
pub mod submission;

/// Configuration management
pub mod config;

/// Utility functions for compression and hashing
pub mod utils;

/// Application constants and configuration values
pub mod constants;

/// Filename sanitizing and credential protection
pub mod security;

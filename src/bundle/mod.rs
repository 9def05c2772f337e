//! Local packaging of a report submission.
//!
//! The [`ArchiveBuilder`] turns a [`Report`](crate::models::Report) and the
//! application's log files into a single zip archive:
//!
//! ```text
//! report.txt ─┐
//! current.log ├──▶ working directory ──▶ report.zip ──▶ bytes
//! previous.log┘        (deleted after compression)
//! ```
//!
//! ## Usage Example
//!
//! ```no_run
//! use report_uploader::bundle::ArchiveBuilder;
//! use report_uploader::config::SubmissionConfig;
//! use report_uploader::models::Report;
//!
//! # fn example() -> anyhow::Result<()> {
//! let builder = ArchiveBuilder::new(SubmissionConfig::default());
//! builder.write_report(&Report::new("Crash on load", "Opened save slot 2"))?;
//! let working_dir = builder.prepare_working_directory()?;
//! let archive_path = builder.compress(&working_dir)?;
//!
//! if let Some(bytes) = builder.read_archive_bytes(&archive_path)? {
//!     println!("Archive is {} bytes", bytes.len());
//! }
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::ArchiveBuilder;
